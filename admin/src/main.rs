use std::path::{Path, PathBuf};

use admin::AdminError;
use admin::client::{ApiClient, InventoryPatch};
use admin::footer_view::FooterLinksView;
use admin::rates;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront::footer::{FooterLinkDraft, FooterSection, FooterSettings, ReorderItem};
use storefront::format::{self, Locale};
use storefront::hero::Hero;
use storefront::marquee::AnnouncementDraft;
use storefront::rate::{EstimatedDays, RateDraft, RateType, ZoneDraft};
use storefront::validate::{self, ProductInput, ReviewInput};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "storefront-admin", about = "Storefront admin console")]
struct Cli {
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "STOREFRONT_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Hero(HeroCommand),
    Footer(FooterCommand),
    Zone(ZoneCommand),
    Rate(RateCommand),
    /// Quote shipping for a cart.
    Quote {
        country: String,
        #[arg(long, default_value_t = 0.0)]
        weight: f64,
        #[arg(long, default_value_t = 0.0)]
        subtotal: f64,
    },
    Inventory(InventoryCommand),
    Marquee(MarqueeCommand),
    Product(ProductCommand),
}

#[derive(Args, Debug)]
struct HeroCommand {
    #[command(subcommand)]
    command: HeroSubcommand,
}

#[derive(Subcommand, Debug)]
enum HeroSubcommand {
    /// Show the homepage hero banner.
    Show,
    /// Replace the banner with a JSON document.
    Set {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct FooterCommand {
    #[command(subcommand)]
    command: FooterSubcommand,
}

#[derive(Subcommand, Debug)]
enum FooterSubcommand {
    Settings,
    /// Replace the footer settings with a JSON document.
    SetSettings {
        file: PathBuf,
    },
    Links,
    AddLink {
        title: String,
        url: String,
        #[arg(long, value_parser = parse_section)]
        section: FooterSection,
        #[arg(long)]
        order: Option<i32>,
    },
    DeleteLink {
        link_id: Uuid,
    },
    /// Reorder links; each `--item` is `id:order:section`.
    Reorder {
        #[arg(long = "item", value_parser = parse_reorder_item, required = true)]
        items: Vec<ReorderItem>,
    },
}

#[derive(Args, Debug)]
struct ZoneCommand {
    #[command(subcommand)]
    command: ZoneSubcommand,
}

#[derive(Subcommand, Debug)]
enum ZoneSubcommand {
    List,
    Add {
        name: String,
        #[arg(long = "country", required = true)]
        countries: Vec<String>,
        #[arg(long = "region")]
        regions: Vec<String>,
        #[arg(long, default_value_t = 0)]
        display_order: i32,
    },
    Delete {
        zone_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct RateCommand {
    #[command(subcommand)]
    command: RateSubcommand,
}

#[derive(Args, Debug)]
struct RateFields {
    #[arg(long)]
    name: String,
    #[arg(long = "type", value_parser = parse_rate_type)]
    rate_type: RateType,
    #[arg(long)]
    base_rate: f64,
    /// `kind=value`, e.g. `min_weight=2`. Repeatable.
    #[arg(long = "condition")]
    conditions: Vec<String>,
    #[arg(long, default_value_t = 0.0)]
    additional_fee: f64,
    #[arg(long)]
    free_over: Option<f64>,
    #[arg(long, default_value_t = 3)]
    min_days: i32,
    #[arg(long, default_value_t = 7)]
    max_days: i32,
    #[arg(long, default_value_t = false)]
    inactive: bool,
}

#[derive(Subcommand, Debug)]
enum RateSubcommand {
    List {
        zone_id: Uuid,
    },
    Add {
        zone_id: Uuid,
        #[command(flatten)]
        fields: RateFields,
    },
    Replace {
        rate_id: Uuid,
        #[command(flatten)]
        fields: RateFields,
    },
    Delete {
        rate_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct InventoryCommand {
    #[command(subcommand)]
    command: InventorySubcommand,
}

#[derive(Subcommand, Debug)]
enum InventorySubcommand {
    List,
    Summary,
    Export {
        #[arg(long, help = "Output file path, or - for stdout", default_value = "-")]
        output: String,
    },
    Import {
        input: PathBuf,
    },
    /// Adjust one row's quantity and/or location.
    Set {
        item_id: Uuid,
        #[arg(long)]
        quantity: Option<i32>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Args, Debug)]
struct MarqueeCommand {
    #[command(subcommand)]
    command: MarqueeSubcommand,
}

#[derive(Subcommand, Debug)]
enum MarqueeSubcommand {
    List,
    Add {
        text: String,
        #[arg(long)]
        link: Option<String>,
        #[arg(long, default_value_t = 0)]
        display_order: i32,
    },
    Delete {
        announcement_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductSubcommand {
    List,
    Show {
        product_id: Uuid,
    },
    /// Create a product from a JSON product form.
    Add {
        file: PathBuf,
    },
    Delete {
        product_id: Uuid,
    },
    /// Move a gallery image from one position to another.
    MoveImage {
        product_id: Uuid,
        from: usize,
        to: usize,
    },
    Reviews {
        product_id: Uuid,
    },
    Review {
        product_id: Uuid,
        #[arg(long)]
        rating: f64,
        #[arg(long)]
        comment: String,
        #[arg(long = "photo")]
        photos: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), AdminError> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.base_url, cli.admin_token.as_deref())?;

    match cli.command {
        Command::Ping => {
            client.ping().await?;
            println!("ok");
            Ok(())
        }
        Command::Hero(hero) => run_hero(&client, hero).await,
        Command::Footer(footer) => run_footer(&client, footer).await,
        Command::Zone(zone) => run_zone(&client, zone).await,
        Command::Rate(rate) => run_rate(&client, rate).await,
        Command::Quote { country, weight, subtotal } => run_quote(&client, &country, weight, subtotal).await,
        Command::Inventory(inventory) => run_inventory(&client, inventory).await,
        Command::Marquee(marquee) => run_marquee(&client, marquee).await,
        Command::Product(product) => run_product(&client, product).await,
    }
}

async fn run_hero(client: &ApiClient, hero: HeroCommand) -> Result<(), AdminError> {
    match hero.command {
        HeroSubcommand::Show => print_json(&client.hero().await?),
        HeroSubcommand::Set { file } => {
            let hero: Hero = read_json(&file)?;
            hero.validate().into_result().map_err(AdminError::Invalid)?;
            print_json(&client.put_hero(&hero).await?)
        }
    }
}

async fn run_footer(client: &ApiClient, footer: FooterCommand) -> Result<(), AdminError> {
    match footer.command {
        FooterSubcommand::Settings => print_json(&client.footer_settings().await?),
        FooterSubcommand::SetSettings { file } => {
            let settings: FooterSettings = read_json(&file)?;
            settings.validate().into_result().map_err(AdminError::Invalid)?;
            print_json(&client.put_footer_settings(&settings).await?)
        }
        FooterSubcommand::Links => print_json(&client.footer_links().await?),
        FooterSubcommand::AddLink { title, url, section, order } => {
            let draft = FooterLinkDraft { title, url, section, order, is_active: true };
            print_json(&client.create_footer_link(&draft).await?)
        }
        FooterSubcommand::DeleteLink { link_id } => {
            client.delete_footer_link(link_id).await?;
            println!("deleted {link_id}");
            Ok(())
        }
        FooterSubcommand::Reorder { items } => {
            let view = FooterLinksView::load(client.clone()).await?;
            view.reorder(&items).await?;
            print_json(&view.links())
        }
    }
}

async fn run_zone(client: &ApiClient, zone: ZoneCommand) -> Result<(), AdminError> {
    match zone.command {
        ZoneSubcommand::List => print_json(&client.zones().await?),
        ZoneSubcommand::Add { name, countries, regions, display_order } => {
            let draft = ZoneDraft { name, countries, regions, is_active: true, display_order };
            print_json(&client.create_zone(&draft).await?)
        }
        ZoneSubcommand::Delete { zone_id } => {
            client.delete_zone(zone_id).await?;
            println!("deleted {zone_id} and its rates");
            Ok(())
        }
    }
}

fn rate_draft(fields: RateFields) -> Result<RateDraft, AdminError> {
    let conditions = rates::build_conditions(fields.rate_type, &fields.conditions)?;
    let mut draft = RateDraft {
        name: fields.name,
        rate_type: fields.rate_type,
        base_rate: fields.base_rate,
        conditions,
        additional_fee: fields.additional_fee,
        free_shipping_threshold: fields.free_over,
        is_active: !fields.inactive,
        estimated_days: EstimatedDays { min: fields.min_days, max: fields.max_days },
    };
    draft.normalize();
    draft.validate().into_result().map_err(AdminError::Invalid)?;
    Ok(draft)
}

async fn run_rate(client: &ApiClient, rate: RateCommand) -> Result<(), AdminError> {
    match rate.command {
        RateSubcommand::List { zone_id } => {
            for rate in client.rates(zone_id).await? {
                println!(
                    "{}  {:<24} {:<6} {:>8.2}  {}  [{}]",
                    rate.id,
                    rate.name,
                    rate.rate_type.as_str(),
                    rate.base_rate,
                    format::format_delivery_time(rate.estimated_days.min, rate.estimated_days.max),
                    rates::describe_conditions(&rate.conditions),
                );
            }
            Ok(())
        }
        RateSubcommand::Add { zone_id, fields } => {
            let draft = rate_draft(fields)?;
            print_json(&client.create_rate(zone_id, &draft).await?)
        }
        RateSubcommand::Replace { rate_id, fields } => {
            let draft = rate_draft(fields)?;
            print_json(&client.replace_rate(rate_id, &draft).await?)
        }
        RateSubcommand::Delete { rate_id } => {
            client.delete_rate(rate_id).await?;
            println!("deleted {rate_id}");
            Ok(())
        }
    }
}

/// Preset for `tag`, plus a notice when the tag is not one of the presets.
fn locale_or_default(tag: &str) -> (Locale, Option<String>) {
    match Locale::for_tag(tag) {
        Some(locale) => (locale, None),
        None => {
            let fallback = Locale::default();
            (fallback, Some(format!("store locale `{tag}` is not supported; showing prices as {}", fallback.tag)))
        }
    }
}

async fn store_locale(client: &ApiClient) -> Locale {
    let (locale, notice) = match client.public_config().await {
        Ok(config) => locale_or_default(&config.locale),
        Err(e) => (Locale::default(), Some(format!("could not read store config ({e}); showing prices as en-US"))),
    };
    if let Some(notice) = notice {
        eprintln!("{notice}");
    }
    locale
}

async fn run_quote(client: &ApiClient, country: &str, weight: f64, subtotal: f64) -> Result<(), AdminError> {
    let quotes = client.quote(country, weight, subtotal).await?;
    if quotes.is_empty() {
        println!("no shipping options for {country}");
        return Ok(());
    }
    let locale = store_locale(client).await;
    for quote in quotes {
        println!(
            "{:<20} {:<24} {:>12}  {}",
            quote.zone_name,
            quote.rate_name,
            format::format_currency(quote.cost, &locale),
            quote.delivery
        );
    }
    Ok(())
}

async fn run_inventory(client: &ApiClient, inventory: InventoryCommand) -> Result<(), AdminError> {
    match inventory.command {
        InventorySubcommand::List => {
            let threshold = client.public_config().await?.low_stock_threshold;
            for item in client.inventory().await? {
                println!(
                    "{:<28} {:<6} {:<10} {:>6}  {:<12} {}",
                    item.product_name,
                    item.size,
                    item.color,
                    item.quantity,
                    item.status(threshold).label(),
                    item.location
                );
            }
            Ok(())
        }
        InventorySubcommand::Summary => print_json(&client.inventory_summary().await?),
        InventorySubcommand::Export { output } => {
            let csv = client.export_inventory().await?;
            if output == "-" {
                print!("{csv}");
            } else {
                std::fs::write(&output, csv)?;
                println!("wrote {output}");
            }
            Ok(())
        }
        InventorySubcommand::Import { input } => {
            let csv = std::fs::read_to_string(&input)?;
            let summary = client.import_inventory(csv).await?;
            println!("created {}, updated {}", summary.created, summary.updated);
            for error in &summary.errors {
                eprintln!("{error}");
            }
            Ok(())
        }
        InventorySubcommand::Set { item_id, quantity, location } => {
            let patch = InventoryPatch::new(quantity, location)?;
            print_json(&client.update_inventory(item_id, &patch).await?)
        }
    }
}

async fn run_product(client: &ApiClient, product: ProductCommand) -> Result<(), AdminError> {
    match product.command {
        ProductSubcommand::List => {
            let locale = store_locale(client).await;
            for product in client.products().await? {
                println!(
                    "{}  {:<32} {:<12} {:>12}  {} image(s)",
                    product.id,
                    product.name,
                    product.category,
                    format::format_currency(product.price, &locale),
                    product.images.len()
                );
            }
            Ok(())
        }
        ProductSubcommand::Show { product_id } => print_json(&client.product(product_id).await?),
        ProductSubcommand::Add { file } => {
            let input: ProductInput = read_json(&file)?;
            validate::validate_product(&input).into_result().map_err(AdminError::Invalid)?;
            print_json(&client.create_product(&input).await?)
        }
        ProductSubcommand::Delete { product_id } => {
            client.delete_product(product_id).await?;
            println!("deleted {product_id}");
            Ok(())
        }
        ProductSubcommand::MoveImage { product_id, from, to } => {
            print_json(&client.move_product_image(product_id, from, to).await?)
        }
        ProductSubcommand::Reviews { product_id } => print_json(&client.reviews(product_id).await?),
        ProductSubcommand::Review { product_id, rating, comment, photos } => {
            let input = review_input(rating, comment, photos)?;
            print_json(&client.create_review(product_id, &input).await?)
        }
    }
}

fn review_input(rating: f64, comment: String, photos: Vec<String>) -> Result<ReviewInput, AdminError> {
    let input = ReviewInput { rating: Some(rating), comment: Some(comment), photos: Some(photos) };
    validate::validate_review(&input).into_result().map_err(AdminError::Invalid)?;
    Ok(input)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AdminError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

async fn run_marquee(client: &ApiClient, marquee: MarqueeCommand) -> Result<(), AdminError> {
    match marquee.command {
        MarqueeSubcommand::List => print_json(&client.announcements().await?),
        MarqueeSubcommand::Add { text, link, display_order } => {
            let draft = AnnouncementDraft { text, link, is_active: true, display_order };
            draft.validate().into_result().map_err(AdminError::Invalid)?;
            print_json(&client.create_announcement(&draft).await?)
        }
        MarqueeSubcommand::Delete { announcement_id } => {
            client.delete_announcement(announcement_id).await?;
            println!("deleted {announcement_id}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AdminError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn parse_section(raw: &str) -> Result<FooterSection, String> {
    raw.trim().to_ascii_lowercase().parse()
}

fn parse_rate_type(raw: &str) -> Result<RateType, String> {
    raw.trim().to_ascii_lowercase().parse()
}

fn parse_reorder_item(raw: &str) -> Result<ReorderItem, String> {
    let mut parts = raw.split(':');
    let (Some(id), Some(order), Some(section), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return Err(format!("`{raw}` must look like id:order:section"));
    };
    Ok(ReorderItem {
        id: id.trim().parse().map_err(|e| format!("bad link id `{id}`: {e}"))?,
        order: order.trim().parse().map_err(|e| format!("bad order `{order}`: {e}"))?,
        section: parse_section(section)?,
    })
}
