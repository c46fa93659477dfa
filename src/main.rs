use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::warn;

use ledger::config::{
    clients_dir, config_dir, load_config, load_rates, resolve_output_dir, CONFIG_TEMPLATE,
    EXAMPLE_CLIENT, RATES_TEMPLATE,
};
use ledger::ledger::{
    derive_view, filter_and_sort, ClientAccount, ClientRecord, DateRange, FanAccount, PageSize,
    PaginationState, RateTable,
};
use ledger::pdf::{generate_report_pdf, write_report_json};
use ledger::report::format::{format_date, format_money, period_end, period_start};
use ledger::report::RenderContext;
use ledger::source::{list_snapshots, load_client};
use ledger::{logging, LedgerError, Result};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version, about = "Client ledger and financial report CLI", long_about = None)]
struct Cli {
    /// Path to config directory (default: $LEDGER_CONFIG_DIR or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List client snapshots
    Clients,

    /// List the unit price table
    Rates,

    /// Show a client's sales and transactions, one page at a time
    Show {
        /// Client identifier (snapshot file name under clients/)
        #[arg(short, long)]
        client: String,

        /// Only records on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only records on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Rows per page: 5, 10, 20 or 50 (default: config page_size)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Page of the sales table (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Page of the transactions table (1-based)
        #[arg(long, default_value_t = 1)]
        payments_page: usize,

        /// Fetch the client from the configured backend
        #[arg(long)]
        remote: bool,
    },

    /// Export a financial report for a client
    Report {
        /// Client identifier (snapshot file name under clients/)
        #[arg(short, long)]
        client: String,

        /// Only records on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only records on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Custom output file path (default: output_dir/<client>_from-<from>_to-<to>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Pdf)]
        format: ReportFormat,

        /// Open generated report with system default viewer
        #[arg(long)]
        open: bool,

        /// Fetch the client from the configured backend
        #[arg(long)]
        remote: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Pdf,
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Clients => cmd_clients(&cfg_dir),
        Commands::Rates => cmd_rates(&cfg_dir),
        Commands::Show {
            client,
            from,
            to,
            rows,
            page,
            payments_page,
            remote,
        } => {
            let range = DateRange::parse(from.as_deref(), to.as_deref())?;
            cmd_show(&cfg_dir, &client, range, rows, page, payments_page, remote)
        }
        Commands::Report {
            client,
            from,
            to,
            output,
            format,
            open,
            remote,
        } => {
            let range = DateRange::parse(from.as_deref(), to.as_deref())?;
            cmd_report(&cfg_dir, &client, range, output, format, open, remote)
        }
    }
}

fn ensure_initialized(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(LedgerError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(LedgerError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    // Create directories
    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::create_dir_all(clients_dir(cfg_dir))?;

    // Write template files
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("rates.toml"), RATES_TEMPLATE)?;
    fs::write(clients_dir(cfg_dir).join("example.json"), EXAMPLE_CLIENT)?;

    println!("Initialized ledger config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set report options:      $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Fill in unit prices:     $EDITOR {}/rates.toml",
        cfg_dir.display()
    );
    println!(
        "  3. Drop client snapshots in: {}/",
        clients_dir(cfg_dir).display()
    );
    println!();
    println!("Then look at a client:");
    println!("  ledger show --client example");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
}

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "SIZE")]
    size: String,
    #[tabled(rename = "RATE")]
    rate: String,
}

#[derive(Tabled)]
struct SaleRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "SIZE")]
    size: String,
    #[tabled(rename = "RATE")]
    rate: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "MEDIUM")]
    medium: String,
    #[tabled(rename = "TRANSFER METHOD")]
    method: String,
    #[tabled(rename = "COMMENT")]
    comment: String,
}

#[derive(Tabled)]
struct FanSaleRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "QTY")]
    quantity: String,
}

#[derive(Tabled)]
struct FanPaymentRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "STOCK")]
    stock: String,
}

fn dash_if_empty(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// List client snapshots
fn cmd_clients(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let records = list_snapshots(cfg_dir)?;

    if records.is_empty() {
        println!("No clients found.");
        println!("Add client snapshots to: {}", clients_dir(cfg_dir).display());
        return Ok(());
    }

    let rows: Vec<ClientRow> = records
        .iter()
        .map(|(id, record)| ClientRow {
            id: id.clone(),
            name: record.name().to_string(),
            category: record.category().to_string(),
            balance: format_money(&config.report.currency_symbol, record.balance()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List the unit price table
fn cmd_rates(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let rates = load_rates(cfg_dir)?;

    if rates.is_empty() {
        println!("No rates configured.");
        println!("Add rates to: {}/rates.toml", cfg_dir.display());
        return Ok(());
    }

    let rows: Vec<RateRow> = rates
        .rows()
        .into_iter()
        .map(|(client, size, rate)| RateRow {
            client: client.to_string(),
            size: size.to_string(),
            rate: format_money(&config.report.currency_symbol, rate),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn warn_if_unpriced(rates: &RateTable, account: &ClientAccount) {
    if rates.client_rates(&account.name).is_none() {
        warn!(client = %account.name, "no rates configured, all sales price at 0");
    }
}

/// Show a client's ledger
fn cmd_show(
    cfg_dir: &Path,
    client_id: &str,
    range: DateRange,
    rows: Option<usize>,
    entry_page: usize,
    payment_page: usize,
    remote: bool,
) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let page_size = match rows {
        Some(n) => PageSize::try_from(n)?,
        None => config.report.page_size,
    };
    let symbol = config.report.currency_symbol.clone();

    let account = match load_client(cfg_dir, &config, client_id, remote)? {
        ClientRecord::Submersible(account) => account,
        ClientRecord::Fan(fan) => {
            show_fan(&fan, &range, &symbol);
            return Ok(());
        }
    };
    let rates = load_rates(cfg_dir)?;
    warn_if_unpriced(&rates, &account);

    let state = PaginationState::new(range, page_size)
        .with_entry_page(entry_page)
        .with_payment_page(payment_page);
    let ctx = RenderContext::now(symbol.as_str());
    let view = derive_view(&account, &rates, &state, &ctx);

    println!("{}", account.name);
    println!("Remaining Balance: {}", format_money(&symbol, account.balance));
    println!(
        "Period: {} to {}",
        period_start(&range),
        period_end(&range, ctx.generated_at.date())
    );
    println!();

    println!(
        "Sales (page {}/{}, {} records)",
        view.entries.page_number,
        view.entries.total_pages(),
        view.entries.total_count
    );
    if view.entries.is_empty() {
        println!("  No records found for selected date range.");
    } else {
        let rows: Vec<SaleRow> = view
            .entries
            .items
            .iter()
            .map(|e| SaleRow {
                date: format_date(e.entry.date),
                quantity: e.entry.quantity.to_string(),
                size: dash_if_empty(e.entry.size.clone()),
                rate: format_money(&symbol, e.rate),
                amount: format_money(&symbol, e.amount),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
    println!();

    println!(
        "Transactions (page {}/{}, {} records)",
        view.payments.page_number,
        view.payments.total_pages(),
        view.payments.total_count
    );
    if view.payments.is_empty() {
        println!("  No transactions found for selected date range.");
    } else {
        let rows: Vec<PaymentRow> = view
            .payments
            .items
            .iter()
            .map(|p| PaymentRow {
                date: format_date(p.date),
                amount: format_money(&symbol, p.amount.coerce()),
                medium: p.medium.as_ref().map_or("-".to_string(), ToString::to_string),
                method: p
                    .transfer_method
                    .as_ref()
                    .map_or("-".to_string(), ToString::to_string),
                comment: p.comment.clone().unwrap_or_else(|| "-".to_string()),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
    println!();

    println!("Total Sales:        {}", format_money(&symbol, view.ledger.total_sales));
    println!("Total Transactions: {}", format_money(&symbol, view.ledger.total_payments));

    Ok(())
}

fn show_fan(fan: &FanAccount, range: &DateRange, symbol: &str) {
    println!("{}", fan.name);
    println!("Remaining Balance: {}", format_money(symbol, fan.balance));
    println!();

    let sales = filter_and_sort(fan.sales.iter().cloned(), range);

    println!("Fan Sales ({} records)", sales.len());
    if sales.is_empty() {
        println!("  No records found for selected date range.");
    } else {
        let rows: Vec<FanSaleRow> = sales
            .iter()
            .map(|s| FanSaleRow {
                date: format_date(s.date),
                model: dash_if_empty(s.model.clone()),
                quantity: s.quantity.to_string(),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
    println!();

    let payments = filter_and_sort(fan.payments.iter().cloned(), range);

    println!("Transactions ({} records)", payments.len());
    if payments.is_empty() {
        println!("  No transactions found for selected date range.");
    } else {
        let rows: Vec<FanPaymentRow> = payments
            .iter()
            .map(|p| FanPaymentRow {
                date: format_date(p.date),
                amount: format_money(symbol, p.amount.coerce()),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
    println!();

    println!("Inventory");
    if fan.inventory.is_empty() {
        println!("  No inventory recorded.");
    } else {
        let rows: Vec<InventoryRow> = fan
            .inventory
            .iter()
            .map(|item| InventoryRow {
                model: dash_if_empty(item.model.clone()),
                stock: item.stock.to_string(),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
}

/// Export a client report
fn cmd_report(
    cfg_dir: &Path,
    client_id: &str,
    range: DateRange,
    output: Option<PathBuf>,
    format: ReportFormat,
    open: bool,
    remote: bool,
) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let account = load_client(cfg_dir, &config, client_id, remote)?.into_ledger_account()?;
    let rates = load_rates(cfg_dir)?;
    warn_if_unpriced(&rates, &account);

    // The report always covers every filtered record, whatever page is on screen
    let state = PaginationState::new(range, config.report.page_size);
    let ctx = RenderContext::now(config.report.currency_symbol.as_str());
    let view = derive_view(&account, &rates, &state, &ctx);

    let output_path = match output {
        Some(path) => path,
        None => {
            let output_dir = resolve_output_dir(&config.report.output_dir, cfg_dir);
            std::fs::create_dir_all(&output_dir)?;
            let path = output_dir.join(&view.document.filename);
            match format {
                ReportFormat::Pdf => path,
                ReportFormat::Json => path.with_extension("json"),
            }
        }
    };

    match format {
        ReportFormat::Pdf => generate_report_pdf(&view.document, &output_path)?,
        ReportFormat::Json => write_report_json(&view.document, &output_path)?,
    }

    let symbol = &config.report.currency_symbol;
    println!("Generated report for '{}'", account.name);
    println!("  Sales:        {}", view.ledger.entries.len());
    println!("  Transactions: {}", view.ledger.payments.len());
    println!("  Total Sales:  {}", format_money(symbol, view.ledger.total_sales));
    println!("  Total Paid:   {}", format_money(symbol, view.ledger.total_payments));
    println!("  Balance:      {}", format_money(symbol, account.balance));
    println!("  Pages:        {}", view.document.page_count());
    println!("  Saved:        {}", output_path.display());

    if open {
        open_path(&output_path)?;
    }

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
