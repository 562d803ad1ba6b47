use std::sync::atomic::AtomicUsize;

use storefront::footer::FooterSection;
use tokio::sync::Notify;
use uuid::Uuid;

use super::*;

// =========================================================================
// MockApi
// =========================================================================

#[derive(Default)]
struct MockApi {
    server: Mutex<Vec<FooterLink>>,
    reject_reorder: bool,
    fail_list_after_load: AtomicBool,
    reorder_gate: Option<Notify>,
    reorder_calls: AtomicUsize,
}

impl MockApi {
    fn with_links(links: Vec<FooterLink>) -> Self {
        Self { server: Mutex::new(links), ..Self::default() }
    }
}

#[async_trait]
impl FooterLinksApi for MockApi {
    async fn list_links(&self) -> Result<Vec<FooterLink>, AdminError> {
        if self.fail_list_after_load.load(Ordering::SeqCst) {
            return Err(AdminError::Api { status: 500, errors: vec!["list unavailable".into()] });
        }
        Ok(self.server.lock().unwrap().clone())
    }

    async fn reorder_links(&self, items: &[ReorderItem]) -> Result<Vec<FooterLink>, AdminError> {
        self.reorder_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.reorder_gate {
            gate.notified().await;
        }
        if self.reject_reorder {
            return Err(AdminError::Api { status: 404, errors: vec!["footer link not found".into()] });
        }
        let mut server = self.server.lock().unwrap();
        footer::apply_reorder(&mut server, items);
        Ok(server.clone())
    }
}

fn link(title: &str, section: FooterSection, order: i32) -> FooterLink {
    FooterLink { id: Uuid::new_v4(), title: title.into(), url: format!("/{title}"), section, order, is_active: true }
}

fn shop_links() -> Vec<FooterLink> {
    vec![
        link("new", FooterSection::Shop, 0),
        link("sale", FooterSection::Shop, 1),
        link("gifts", FooterSection::Shop, 2),
    ]
}

fn titles(links: &[FooterLink]) -> Vec<&str> {
    links.iter().map(|l| l.title.as_str()).collect()
}

fn swap_first_and_last(links: &[FooterLink]) -> Vec<ReorderItem> {
    vec![
        ReorderItem { id: links[0].id, order: 2, section: FooterSection::Shop },
        ReorderItem { id: links[2].id, order: 0, section: FooterSection::Shop },
    ]
}

// =========================================================================
// reorder
// =========================================================================

#[tokio::test]
async fn successful_reorder_shows_server_order() {
    let links = shop_links();
    let items = swap_first_and_last(&links);
    let view = FooterLinksView::load(MockApi::with_links(links)).await.unwrap();

    view.reorder(&items).await.unwrap();

    assert_eq!(titles(&view.links()), vec!["gifts", "sale", "new"]);
    assert!(!view.reorder_in_flight());
}

#[tokio::test]
async fn rejected_reorder_rolls_back_to_server_list() {
    let links = shop_links();
    let items = swap_first_and_last(&links);
    let api = MockApi { reject_reorder: true, ..MockApi::with_links(links) };
    let view = FooterLinksView::load(api).await.unwrap();

    let err = view.reorder(&items).await.unwrap_err();

    assert!(matches!(err, AdminError::Api { status: 404, .. }));
    assert_eq!(titles(&view.links()), vec!["new", "sale", "gifts"]);
    assert!(!view.reorder_in_flight());
}

#[tokio::test]
async fn rollback_falls_back_to_snapshot_when_refetch_fails() {
    let links = shop_links();
    let items = swap_first_and_last(&links);
    let api = MockApi { reject_reorder: true, ..MockApi::with_links(links) };
    let view = FooterLinksView::load(api).await.unwrap();
    view.api.fail_list_after_load.store(true, Ordering::SeqCst);

    assert!(view.reorder(&items).await.is_err());
    assert_eq!(titles(&view.links()), vec!["new", "sale", "gifts"]);
}

#[tokio::test]
async fn overlapping_reorder_is_refused() {
    let links = shop_links();
    let items = swap_first_and_last(&links);
    let api = MockApi { reorder_gate: Some(Notify::new()), ..MockApi::with_links(links) };
    let view = FooterLinksView::load(api).await.unwrap();

    let (first, second) = tokio::join!(view.reorder(&items), async {
        tokio::task::yield_now().await;
        // The first reorder is parked on the gate with the optimistic order applied.
        assert!(view.reorder_in_flight());
        assert_eq!(titles(&view.links()), vec!["gifts", "sale", "new"]);
        let result = view.reorder(&items).await;
        if let Some(gate) = &view.api.reorder_gate {
            gate.notify_one();
        }
        result
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(AdminError::ReorderInFlight)));
    assert_eq!(view.api.reorder_calls.load(Ordering::SeqCst), 1);
    assert!(!view.reorder_in_flight());
}

#[tokio::test]
async fn invalid_reorder_never_reaches_the_server() {
    let links = shop_links();
    let id = links[0].id;
    let view = FooterLinksView::load(MockApi::with_links(links)).await.unwrap();

    let items = vec![
        ReorderItem { id, order: 0, section: FooterSection::Shop },
        ReorderItem { id, order: -1, section: FooterSection::Shop },
    ];
    let err = view.reorder(&items).await.unwrap_err();

    let AdminError::Invalid(errors) = err else {
        panic!("expected invalid reorder");
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(view.api.reorder_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn moving_a_link_to_another_section() {
    let links = vec![link("about", FooterSection::Company, 0), link("terms", FooterSection::Legal, 0)];
    let about = links[0].id;
    let view = FooterLinksView::load(MockApi::with_links(links)).await.unwrap();

    view.reorder(&[ReorderItem { id: about, order: 1, section: FooterSection::Legal }])
        .await
        .unwrap();

    let shown = view.links();
    assert_eq!(titles(&shown), vec!["terms", "about"]);
    assert!(shown.iter().all(|l| l.section == FooterSection::Legal));
}
