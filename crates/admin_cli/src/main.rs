use std::error::Error;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{
    Currency, DashboardSession, Engine, Item, ItemNew, ItemQuery, ItemStatus, Money, Sale, metrics,
};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "pantagon_admin")]
#[command(about = "Admin utilities for Pantagon (manage items, print the dashboard)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./pantagon.db?mode=rwc"
    )]
    database_url: String,

    /// Currency used to display amounts.
    #[arg(long, default_value = "THB", value_parser = parse_currency)]
    currency: Currency,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List items, newest purchase first.
    List(ListArgs),
    /// Add an item.
    Add(AddArgs),
    /// Mark an owned item as sold.
    Sell(SellArgs),
    /// Delete an item.
    Delete(DeleteArgs),
    /// Print dashboard statistics.
    Dashboard,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    group: Option<String>,
    #[arg(long, value_parser = parse_status)]
    status: Option<ItemStatus>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = engine::DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    /// Purchase price in major units (e.g. `1250.50`).
    #[arg(long, value_parser = parse_money)]
    price: Money,
    /// Shipping, fees, etc.
    #[arg(long, default_value = "0", value_parser = parse_money)]
    extra: Money,
    /// Purchase date, `YYYY-MM-DD`. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    group: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Exclude the item from the aggregate burn rate.
    #[arg(long)]
    no_daily_burn: bool,
}

#[derive(Args, Debug)]
struct SellArgs {
    #[arg(long)]
    id: Uuid,
    #[arg(long, value_parser = parse_money)]
    price: Money,
    /// Sale date, `YYYY-MM-DD`. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    #[arg(long)]
    id: Uuid,
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::try_from(raw).map_err(|err| err.to_string())
}

fn parse_status(raw: &str) -> Result<ItemStatus, String> {
    ItemStatus::try_from(raw).map_err(|err| err.to_string())
}

fn parse_money(raw: &str) -> Result<Money, String> {
    let money: Money = raw.parse().map_err(|err: engine::EngineError| err.to_string())?;
    if money.is_negative() {
        return Err("amount must be >= 0".to_string());
    }
    Ok(money)
}

fn print_item(item: &Item, currency: Currency, today: NaiveDate) {
    let price = currency.format(item.purchase_price.as_f64(), None);
    let burn = currency.format(metrics::item_daily_burn(item, today), None);
    let sale = match (item.sale, item.profit()) {
        (Some(sale), Some(profit)) => format!(
            " sold {} for {} (profit {})",
            sale.date,
            currency.format(sale.price.as_f64(), None),
            currency.format(profit.as_f64(), Some(0)),
        ),
        _ => String::new(),
    };
    println!(
        "{}  {:<24} {:>12}  {}  {}/day  [{} / {}]{}",
        item.id,
        item.name,
        price,
        item.purchase_date,
        burn,
        item.group_name.as_deref().unwrap_or("-"),
        item.category.as_deref().unwrap_or("-"),
        sale,
    );
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let currency = cli.currency;
    let today = Utc::now().date_naive();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .currency(currency)
        .build()
        .await?;

    match cli.command {
        Command::List(args) => {
            let mut session = DashboardSession::new(engine);
            session.reload(today).await?;
            session.set_query(
                ItemQuery::new()
                    .with_search(args.search)
                    .with_group(args.group)
                    .with_status(args.status)
                    .with_category(args.category)
                    .with_page_size(args.page_size)
                    .with_page(args.page),
            );

            let page = session.visible();
            for row in &page.items {
                print_item(row.item, currency, today);
            }
            println!(
                "page {}/{} ({} items)",
                page.page, page.total_pages, page.total_items
            );
        }
        Command::Add(args) => {
            let item = engine
                .create_item(ItemNew {
                    name: args.name,
                    purchase_price: args.price,
                    extra_cost: args.extra,
                    purchase_date: args.date.unwrap_or(today),
                    sale: None,
                    group_name: args.group,
                    category: args.category,
                    daily_burn: !args.no_daily_burn,
                })
                .await?;
            println!("created item: {} ({})", item.name, item.id);
        }
        Command::Sell(args) => {
            let item = engine
                .sell_item(
                    args.id,
                    Sale {
                        date: args.date.unwrap_or(today),
                        price: args.price,
                    },
                )
                .await?;
            let profit = item.profit().unwrap_or(Money::ZERO);
            println!(
                "sold item: {} (profit {})",
                item.name,
                currency.format(profit.as_f64(), Some(0))
            );
        }
        Command::Delete(args) => {
            engine.delete_item(args.id).await?;
            println!("deleted item: {}", args.id);
        }
        Command::Dashboard => {
            let mut session = DashboardSession::new(engine);
            session.reload(today).await?;
            let Some(snapshot) = session.snapshot() else {
                return Ok(());
            };
            let stats = &snapshot.stats;

            println!(
                "items: {} ({} owned, {} sold)",
                stats.total_items, stats.owned_items, stats.sold_items
            );
            println!(
                "daily burn rate: {}",
                currency.format(stats.daily_burn_rate, None)
            );
            println!(
                "total profit: {}",
                currency.format(stats.total_profit.as_f64(), Some(0))
            );

            let mut rates = snapshot.group_burn_rates.clone();
            rates.sort_by(|a, b| b.total_burn.total_cmp(&a.total_burn));
            for rate in rates {
                println!(
                    "  {:<24} {:>12}/day  ({} items)",
                    rate.group_name,
                    currency.format(rate.total_burn, None),
                    rate.item_count
                );
            }
            for id in &snapshot.integrity_warnings {
                eprintln!("warning: item {id} was sold before it was purchased");
            }
        }
    }

    Ok(())
}
