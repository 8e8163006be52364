use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleetdash::config::{config_dir, load_config, load_dashboard_data, DashboardConfig, CONFIG_TEMPLATE};
use fleetdash::dataset::{dataset_to_toml, Dataset};
use fleetdash::engine::{
    agency_comparison, agency_revenue, agency_summaries, category_breakdown, category_shares,
    expense_summary, expenses_by_category, filter_expenses, filter_vehicles, fleet_summary,
    role_counts, vehicle_rankings, DashboardView, ExpenseFilter, GrowthWindow, KpiOptions,
    Selection, Trend, VehicleFilter,
};
use fleetdash::error::{DashboardError, Result};
use fleetdash::format::{percentage, percentage_or_undefined, share, NumberFormat};
use fleetdash::model::{AgencySelection, ExpenseStatus, VehicleStatus, ALL_AGENCIES};

#[derive(Parser)]
#[command(name = "fleetdash")]
#[command(version, about = "Financial dashboard for a vehicle rental network", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.fleetdash or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Dataset file to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with config.toml and a sample dataset.toml
    Init,

    /// Show the KPI cards for the network or one agency
    Kpis {
        /// Agency id, or "all"
        #[arg(short, long, default_value = ALL_AGENCIES)]
        agency: String,

        /// Growth window in months, or "half" (default: from config)
        #[arg(long, value_name = "MONTHS|half")]
        growth_window: Option<String>,

        /// Print the raw KPI values as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the month-by-month table with evolution
    Monthly {
        /// Agency id, or "all"
        #[arg(short, long, default_value = ALL_AGENCIES)]
        agency: String,
    },

    /// Compare agencies: revenue, profit, margin and fleet size
    Agencies,

    /// Monthly revenue of every agency side by side
    Compare,

    /// List vehicles with fleet KPIs and rankings
    Fleet {
        /// Free-text search over brand, model and license plate
        #[arg(short, long, default_value = "")]
        search: String,

        /// Agency id, or "all"
        #[arg(short, long, default_value = ALL_AGENCIES)]
        agency: String,

        /// Vehicle status (available, rented, maintenance, out_of_service) or "all"
        #[arg(long, default_value = "all")]
        status: String,

        /// Number of vehicles in the revenue ranking (default: from config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Revenue by vehicle category and the expense breakdown
    Categories,

    /// List expense transactions
    Expenses {
        /// Free-text search over description and category
        #[arg(short, long, default_value = "")]
        search: String,

        /// Agency id, or "all"
        #[arg(short, long, default_value = ALL_AGENCIES)]
        agency: String,

        /// Expense category name, or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Expense status (pending, approved, rejected) or "all"
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// List users and role counts
    Users,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    let data = cli.data;
    let context = || Context::load(&cfg_dir, data.as_deref());

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Kpis {
            agency,
            growth_window,
            json,
        } => cmd_kpis(&context()?, &agency, growth_window.as_deref(), json),
        Commands::Monthly { agency } => cmd_monthly(&context()?, &agency),
        Commands::Agencies => cmd_agencies(&context()?),
        Commands::Compare => cmd_compare(&context()?),
        Commands::Fleet {
            search,
            agency,
            status,
            top,
        } => cmd_fleet(&context()?, search, &agency, &status, top),
        Commands::Categories => cmd_categories(&context()?),
        Commands::Expenses {
            search,
            agency,
            category,
            status,
        } => cmd_expenses(&context()?, search, &agency, &category, &status),
        Commands::Users => cmd_users(&context()?),
    }
}

/// Config, dataset and formatter shared by every view command
struct Context {
    config: DashboardConfig,
    dataset: Dataset,
    fmt: NumberFormat,
}

impl Context {
    fn load(cfg_dir: &Path, data: Option<&Path>) -> Result<Self> {
        let config = load_config(cfg_dir)?;
        let dataset = load_dashboard_data(cfg_dir, &config, data)?;
        let fmt = NumberFormat::new(config.format.clone());
        Ok(Self {
            config,
            dataset,
            fmt,
        })
    }

    fn kpi_options(&self) -> KpiOptions {
        self.config.kpi.options()
    }

    fn money(&self, value: impl Into<f64>) -> String {
        self.fmt.currency(value.into())
    }

    fn money_i64(&self, value: i64) -> String {
        self.fmt.currency(value as f64)
    }
}

/// "all" (or nothing) means no constraint
fn optional_filter<T>(value: &str) -> Result<Option<T>>
where
    T: FromStr<Err = DashboardError>,
{
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(DashboardError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("dataset.toml"), dataset_to_toml(&Dataset::sample())?)?;
    info!(path = %cfg_dir.display(), "initialized config directory");

    println!("Initialized fleetdash config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Adjust formatting and KPI settings:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Replace the sample data:             $EDITOR {}/dataset.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then look at the dashboard:");
    println!("  fleetdash kpis --agency <agency-id>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "KPI")]
    name: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "EXPENSES")]
    expenses: String,
    #[tabled(rename = "PROFIT")]
    profit: String,
    #[tabled(rename = "RENTALS")]
    rentals: String,
    #[tabled(rename = "EVOLUTION")]
    evolution: String,
}

#[derive(Tabled)]
struct AgencyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "AGENCY")]
    name: String,
    #[tabled(rename = "VEHICLES")]
    vehicles: usize,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "PROFIT")]
    profit: String,
    #[tabled(rename = "MARGIN")]
    margin: String,
}

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "VEHICLE")]
    name: String,
    #[tabled(rename = "PLATE")]
    plate: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "AGENCY")]
    agency: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "RENTALS")]
    rentals: u32,
}

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "VEHICLE")]
    name: String,
    #[tabled(rename = "AGENCY")]
    agency: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "AVG/RENTAL")]
    avg_per_rental: String,
}

#[derive(Tabled)]
struct AmountRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "VEHICLES")]
    vehicles: usize,
    #[tabled(rename = "RENTALS")]
    rentals: u64,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "AVG/VEHICLE")]
    avg_revenue: String,
}

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "SHARE")]
    share: String,
    #[tabled(rename = "REPORTED")]
    reported: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "AGENCY")]
    agency: String,
    #[tabled(rename = "VEHICLE")]
    vehicle: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "INITIALS")]
    initials: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "ROLE")]
    role: String,
    #[tabled(rename = "AGENCY")]
    agency: String,
    #[tabled(rename = "LAST LOGIN")]
    last_login: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn trend_marker(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Flat => "→",
    }
}

/// Show KPI cards
fn cmd_kpis(ctx: &Context, agency: &str, growth_window: Option<&str>, json: bool) -> Result<()> {
    let mut options = ctx.kpi_options();
    if let Some(window) = growth_window {
        options.growth_window = window.parse::<GrowthWindow>()?;
    }

    let selection = Selection::agency(agency.parse::<AgencySelection>()?);
    let view = DashboardView::build(&ctx.dataset, &selection, &options)?;
    let kpis = &view.kpis;

    if json {
        println!("{}", serde_json::to_string_pretty(kpis)?);
        return Ok(());
    }

    let rows = vec![
        KpiRow {
            name: "Revenue",
            value: ctx.money_i64(kpis.total_revenue),
        },
        KpiRow {
            name: "Expenses",
            value: ctx.money_i64(kpis.total_expenses),
        },
        KpiRow {
            name: "Net profit",
            value: ctx.money_i64(kpis.net_profit),
        },
        KpiRow {
            name: "Profit margin",
            value: share(kpis.profit_margin),
        },
        KpiRow {
            name: "Rentals",
            value: ctx.fmt.number(kpis.total_rentals as i64),
        },
        KpiRow {
            name: "Avg revenue/rental",
            value: ctx.fmt.currency_or_undefined(kpis.avg_revenue_per_rental),
        },
        KpiRow {
            name: "Fleet utilization",
            value: share(Some(kpis.fleet_utilization)),
        },
        KpiRow {
            name: "Revenue growth",
            value: percentage_or_undefined(kpis.revenue_growth),
        },
        KpiRow {
            name: "Expense growth",
            value: percentage_or_undefined(kpis.expense_growth),
        },
    ];

    println!("{} ({})", view.agency_name, view.agency);
    println!("{}", render(rows));
    println!(
        "Growth compares the first and last {} month(s).",
        options.growth_window.months(view.series.len())
    );

    Ok(())
}

/// Show the monthly table
fn cmd_monthly(ctx: &Context, agency: &str) -> Result<()> {
    let selection = Selection::agency(agency.parse::<AgencySelection>()?);
    let view = DashboardView::build(&ctx.dataset, &selection, &ctx.kpi_options())?;

    let rows: Vec<MonthRow> = view
        .evolution
        .iter()
        .map(|m| MonthRow {
            month: m.record.month_name().to_string(),
            revenue: ctx.money_i64(m.record.revenue()),
            expenses: ctx.money_i64(m.record.expenses()),
            profit: ctx.money_i64(m.record.profit()),
            rentals: ctx.fmt.number(i64::from(m.record.rentals())),
            evolution: match m.profit_growth {
                Some(growth) => format!("{} {}", trend_marker(m.trend), percentage(growth)),
                None => trend_marker(m.trend).to_string(),
            },
        })
        .collect();

    let total_rentals: i64 = view.series.iter().map(|m| i64::from(m.rentals())).sum();

    println!("{} ({})", view.agency_name, view.agency);
    println!("{}", render(rows));
    println!(
        "Total: {} revenue, {} profit, {} rentals",
        ctx.money_i64(view.kpis.total_revenue),
        ctx.money_i64(view.kpis.net_profit),
        ctx.fmt.number(total_rentals)
    );

    Ok(())
}

/// Compare agencies
fn cmd_agencies(ctx: &Context) -> Result<()> {
    let summaries = agency_summaries(&ctx.dataset, &ctx.kpi_options())?;

    if summaries.is_empty() {
        println!("No agencies in the dataset.");
        return Ok(());
    }

    let rows: Vec<AgencyRow> = summaries
        .iter()
        .map(|s| AgencyRow {
            id: s.agency_id.clone(),
            name: s.name.clone(),
            vehicles: s.vehicle_count,
            revenue: ctx.money_i64(s.kpis.total_revenue),
            profit: ctx.money_i64(s.kpis.net_profit),
            margin: share(s.kpis.profit_margin),
        })
        .collect();

    println!("{}", render(rows));
    Ok(())
}

/// Month x agency revenue matrix
fn cmd_compare(ctx: &Context) -> Result<()> {
    let dataset = &ctx.dataset;
    let matrix = agency_comparison(&dataset.monthly, &dataset.agencies);

    let mut builder = Builder::default();
    let mut header = vec!["MONTH".to_string()];
    header.extend(dataset.agencies.iter().map(|a| a.city.to_uppercase()));
    builder.push_record(header);

    for (month, row) in dataset.monthly.iter().zip(&matrix) {
        let mut record = vec![month.month_short().to_string()];
        record.extend(row.revenues.iter().map(|(_, revenue)| ctx.money_i64(*revenue)));
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

/// Fleet view
fn cmd_fleet(
    ctx: &Context,
    search: String,
    agency: &str,
    status: &str,
    top: Option<usize>,
) -> Result<()> {
    let dataset = &ctx.dataset;
    let filter = VehicleFilter {
        search,
        agency: agency.parse()?,
        status: optional_filter::<VehicleStatus>(status)?,
    };

    let summary = fleet_summary(&dataset.vehicles);
    println!("Fleet");
    println!("{}", "-".repeat(50));
    println!("Vehicles:       {}", summary.total);
    println!("Available:      {}", summary.available);
    println!("Rented:         {}", summary.rented);
    println!("Maintenance:    {}", summary.maintenance);
    println!("Out of service: {}", summary.out_of_service);
    println!("Total revenue:  {}", ctx.money_i64(summary.total_revenue));
    println!();

    let filtered = filter_vehicles(&dataset.vehicles, &filter);
    if filtered.is_empty() {
        println!("No vehicles match the given filters.");
    } else {
        let rows: Vec<VehicleRow> = filtered
            .iter()
            .map(|v| VehicleRow {
                id: v.id.clone(),
                name: v.display_name(),
                plate: v.license_plate.clone(),
                category: v.category.to_string(),
                agency: dataset.agency_name(&v.agency_id).to_string(),
                status: v.status.label().to_string(),
                revenue: ctx.money_i64(v.total_revenue),
                rentals: v.total_rentals,
            })
            .collect();
        println!("{}", render(rows));
        println!("Showing {} of {} vehicles", filtered.len(), dataset.vehicles.len());
    }

    let top = top.unwrap_or(ctx.config.fleet.top_vehicles);
    let rankings: Vec<RankingRow> = vehicle_rankings(&dataset.vehicles, top)
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankingRow {
            rank: i + 1,
            name: r.vehicle.display_name(),
            agency: dataset.agency_name(&r.vehicle.agency_id).to_string(),
            revenue: ctx.money_i64(r.vehicle.total_revenue),
            avg_per_rental: ctx.fmt.currency_or_undefined(r.avg_per_rental),
        })
        .collect();

    if !rankings.is_empty() {
        println!();
        println!("Top {} vehicles by revenue", rankings.len());
        println!("{}", render(rankings));
    }

    let by_agency: Vec<AmountRow> = agency_revenue(&dataset.vehicles)
        .into_iter()
        .map(|a| AmountRow {
            name: dataset.agency_name(&a.agency_id).to_string(),
            amount: ctx.money_i64(a.revenue),
        })
        .collect();

    if !by_agency.is_empty() {
        println!();
        println!("Revenue by agency");
        println!("{}", render(by_agency));
    }

    Ok(())
}

/// Category breakdowns
fn cmd_categories(ctx: &Context) -> Result<()> {
    let dataset = &ctx.dataset;

    let rows: Vec<CategoryRow> = category_breakdown(&dataset.vehicles)
        .iter()
        .map(|c| CategoryRow {
            category: c.category.to_string(),
            vehicles: c.vehicle_count,
            rentals: c.rentals,
            revenue: ctx.money_i64(c.revenue),
            avg_revenue: ctx.money(c.avg_revenue()),
        })
        .collect();

    println!("Revenue by vehicle category");
    if rows.is_empty() {
        println!("No vehicles in the dataset.");
    } else {
        println!("{}", render(rows));
    }

    let shares = category_shares(&dataset.expense_categories);
    let rows: Vec<ShareRow> = shares
        .shares
        .iter()
        .map(|s| ShareRow {
            category: s.name.clone(),
            amount: ctx.money(s.amount),
            share: share(s.share),
            reported: share(Some(s.reported_percentage)),
        })
        .collect();

    println!();
    println!("Expenses by category");
    if rows.is_empty() {
        println!("No expense categories in the dataset.");
    } else {
        println!("{}", render(rows));
        println!("Total expenses: {}", ctx.money(shares.total));
    }

    Ok(())
}

/// Expense transactions
fn cmd_expenses(
    ctx: &Context,
    search: String,
    agency: &str,
    category: &str,
    status: &str,
) -> Result<()> {
    let dataset = &ctx.dataset;
    let agency: AgencySelection = agency.parse()?;
    let category = match category.trim() {
        "" => None,
        c if c.eq_ignore_ascii_case("all") => None,
        c => Some(c.to_string()),
    };

    let scoped = dataset.expenses_for(&agency);
    let summary = expense_summary(scoped.iter().copied());
    println!("Expenses");
    println!("{}", "-".repeat(50));
    println!("Total:        {}", ctx.money(summary.total));
    println!("Approved:     {}", ctx.money(summary.approved));
    println!("Pending:      {}", ctx.money(summary.pending));
    println!("Rejected:     {}", ctx.money(summary.rejected));
    println!("Transactions: {}", summary.count);
    println!();

    let filter = ExpenseFilter {
        search,
        agency,
        category,
        status: optional_filter::<ExpenseStatus>(status)?,
    };
    let filtered = filter_expenses(&dataset.expenses, &filter);

    if filtered.is_empty() {
        println!("No expenses match the given filters.");
        return Ok(());
    }

    let rows: Vec<ExpenseRow> = filtered
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.clone(),
            date: e.date.to_string(),
            category: e.category.clone(),
            description: e.description.clone(),
            agency: dataset.agency_name(&e.agency_id).to_string(),
            vehicle: e
                .vehicle_id
                .as_deref()
                .map(|id| dataset.vehicle_label(id))
                .unwrap_or_default(),
            amount: ctx.money(e.amount),
            status: e.status.label().to_string(),
        })
        .collect();

    println!("{}", render(rows));

    let by_category: Vec<AmountRow> = expenses_by_category(filtered.iter().copied())
        .into_iter()
        .map(|c| AmountRow {
            name: format!("{} ({})", c.category, c.count),
            amount: ctx.money(c.amount),
        })
        .collect();
    println!();
    println!("{}", render(by_category));

    Ok(())
}

/// Users and roles
fn cmd_users(ctx: &Context) -> Result<()> {
    let dataset = &ctx.dataset;

    println!("Roles");
    println!("{}", "-".repeat(50));
    for (role, count) in role_counts(&dataset.users) {
        println!("{:<16}{}", role.label(), count);
    }
    println!();

    if dataset.users.is_empty() {
        println!("No users in the dataset.");
        return Ok(());
    }

    let rows: Vec<UserRow> = dataset
        .users
        .iter()
        .map(|u| UserRow {
            initials: u.initials(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.label().to_string(),
            agency: dataset.agency_name(&u.agency_id).to_string(),
            last_login: u.last_login.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    println!("{}", render(rows));
    Ok(())
}
