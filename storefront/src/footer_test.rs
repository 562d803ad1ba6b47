use super::*;

fn link(title: &str, section: FooterSection, order: i32) -> FooterLink {
    FooterLink { id: Uuid::new_v4(), title: title.into(), url: "/".into(), section, order, is_active: true }
}

#[test]
fn default_settings_are_valid() {
    assert!(FooterSettings::default().validate().is_valid);
}

#[test]
fn settings_reject_bad_email_and_social_urls() {
    let settings = FooterSettings {
        company_name: " ".into(),
        contact_email: "nobody".into(),
        social: SocialLinks { instagram: Some("instagram.com/shop".into()), ..SocialLinks::default() },
        ..FooterSettings::default()
    };
    assert_eq!(
        settings.validate().errors,
        vec![
            "Company name is required",
            "`nobody` is not a valid email address",
            "Instagram link must start with http:// or https://",
        ]
    );
}

#[test]
fn link_draft_accepts_relative_mailto_and_absolute() {
    for url in ["/shipping", "mailto:help@example.com", "https://example.com/terms"] {
        let draft = FooterLinkDraft {
            title: "Help".into(),
            url: url.into(),
            section: FooterSection::Support,
            order: None,
            is_active: true,
        };
        assert!(draft.validate().is_valid, "{url}");
    }
}

#[test]
fn link_draft_rejects_missing_fields_and_bare_hosts() {
    let draft = FooterLinkDraft {
        title: String::new(),
        url: "example.com".into(),
        section: FooterSection::Shop,
        order: Some(-1),
        is_active: true,
    };
    assert_eq!(draft.validate().errors.len(), 3);
}

#[test]
fn from_draft_uses_explicit_order_or_fallback() {
    let draft = FooterLinkDraft {
        title: " About ".into(),
        url: "/about".into(),
        section: FooterSection::Company,
        order: None,
        is_active: true,
    };
    let link = FooterLink::from_draft(Uuid::nil(), draft.clone(), 4);
    assert_eq!(link.title, "About");
    assert_eq!(link.order, 4);
    let link = FooterLink::from_draft(Uuid::nil(), FooterLinkDraft { order: Some(1), ..draft }, 4);
    assert_eq!(link.order, 1);
}

#[test]
fn section_round_trips_through_str() {
    for section in [FooterSection::Shop, FooterSection::Company, FooterSection::Support, FooterSection::Legal] {
        assert_eq!(section.as_str().parse::<FooterSection>(), Ok(section));
    }
    assert!("blog".parse::<FooterSection>().is_err());
}

#[test]
fn validate_reorder_rejects_empty_duplicates_and_negatives() {
    assert!(!validate_reorder(&[]).is_valid);

    let id = Uuid::new_v4();
    let items = [
        ReorderItem { id, order: 0, section: FooterSection::Shop },
        ReorderItem { id, order: -1, section: FooterSection::Shop },
    ];
    let result = validate_reorder(&items);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn apply_reorder_moves_between_sections_and_sorts() {
    let mut links = vec![
        link("Terms", FooterSection::Legal, 0),
        link("New In", FooterSection::Shop, 0),
        link("Sale", FooterSection::Shop, 1),
    ];
    let sale = links[2].id;
    let new_in = links[1].id;
    let terms = links[0].id;

    apply_reorder(
        &mut links,
        &[
            ReorderItem { id: sale, order: 0, section: FooterSection::Shop },
            ReorderItem { id: new_in, order: 1, section: FooterSection::Shop },
            ReorderItem { id: terms, order: 0, section: FooterSection::Support },
            ReorderItem { id: Uuid::new_v4(), order: 9, section: FooterSection::Legal },
        ],
    );

    let order: Vec<_> = links.iter().map(|l| (l.title.as_str(), l.section)).collect();
    assert_eq!(
        order,
        vec![("Sale", FooterSection::Shop), ("New In", FooterSection::Shop), ("Terms", FooterSection::Support)]
    );
}
