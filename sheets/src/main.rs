use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use axum::{ServiceExt, extract::Request};
use sheets::api::{self, ApiState};
use sheets::client::{Session, SheetsClient};
use sheets::column_type::ColumnType;
use sheets::config::Config;
use sheets::store::purge::purge_deleted;
use sheets::ui::{CellWidget, Commit, ConfigView, GridView, ListView};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "sheets", about = "Sheets: spreadsheet-style table editor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Hard-delete soft-deleted tables, columns and rows
    Purge {
        /// Count what would be removed without removing it
        #[arg(long, action = clap::ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Edit sheets through a running server
    Sheet {
        #[command(subcommand)]
        action: SheetAction,
    },
}

#[derive(Subcommand)]
enum SheetAction {
    /// List tables
    List,
    /// Print a table as a grid (defaults to the first table)
    Show { table: Option<String> },
    /// Print a table's name and column settings
    Config { table: String },
    /// Create a table
    Create { name: String },
    /// Rename a table
    Rename { table: String, name: String },
    /// Delete a table
    Delete { table: String },
    /// Append a column
    AddColumn {
        table: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type", default_value = "text")]
        column_type: ColumnType,
        /// Comma separated, select types only
        #[arg(long)]
        options: Option<String>,
    },
    /// Delete a column (by id or name)
    DeleteColumn { table: String, column: String },
    /// Append an empty row
    AddRow { table: String },
    /// Delete a row (by id or label)
    DeleteRow { table: String, row: String },
    /// Set a cell. Checkboxes take true/false; multi-selects take +Option / -Option.
    Set {
        table: String,
        row: String,
        column: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Init structured logging (respects RUST_LOG; defaults to info)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        None | Some(Commands::Serve) => serve(config).await?,
        Some(Commands::Purge { dry_run }) => {
            let db = connect(&config).await?;
            let report = purge_deleted(&db, dry_run).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(Commands::Sheet { action }) => {
            let mut session = Session::new(SheetsClient::new(config.api_url.clone()));
            handle_sheet_action(&mut session, action).await?;
        }
    }

    Ok(())
}

/// Connect to the database and run migrations.
async fn connect(config: &Config) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error>> {
    tracing::info!(database = %config.redacted_database_url(), "connecting to database");

    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    tracing::info!("database initialized");
    Ok(db)
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect(&config).await?;
    let app = api::service(ApiState { db }, &config);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "HTTP API online");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}

/// Resolve a table argument (id or name) against the live list.
async fn resolve_table(
    session: &mut Session,
    key: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut list = ListView::new(session.tables().await?);
    if let Some(key) = key
        && !list.select(key)
    {
        return Err(format!("no table named {key:?}").into());
    }
    list.selected()
        .map(str::to_string)
        .ok_or_else(|| "no tables yet".into())
}

async fn handle_sheet_action(
    session: &mut Session,
    action: SheetAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SheetAction::List => {
            let list = ListView::new(session.tables().await?);
            print!("{}", list.render());
        }
        SheetAction::Show { table } => {
            let id = resolve_table(session, table.as_deref()).await?;
            let node = session.table(&id).await?;
            print!("{}", GridView::from_table(&node).render());
        }
        SheetAction::Config { table } => {
            let id = resolve_table(session, Some(&table)).await?;
            print!("{}", ConfigView::from_table(&session.table(&id).await?).render());
        }
        SheetAction::Create { name } => {
            let mut req = ListView::new(session.tables().await?).new_table_request();
            req.name = name;
            let node = session.create_table(req).await?;
            tracing::info!(id = %node.id, name = %node.name, "Created table");
        }
        SheetAction::Rename { table, name } => {
            let id = resolve_table(session, Some(&table)).await?;
            let mut view = ConfigView::from_table(&session.table(&id).await?);
            view.table_name = name;
            let node = view.save_table(session).await?;
            tracing::info!(id = %node.id, name = %node.name, "Renamed table");
        }
        SheetAction::Delete { table } => {
            let id = resolve_table(session, Some(&table)).await?;
            ConfigView::from_table(&session.table(&id).await?)
                .delete_table(session)
                .await?;
            tracing::info!(id = %id, "Deleted table");
        }
        SheetAction::AddColumn {
            table,
            name,
            column_type,
            options,
        } => {
            let id = resolve_table(session, Some(&table)).await?;
            let view = ConfigView::from_table(&session.table(&id).await?);
            let mut req = view.add_column_request();
            if let Some(name) = name {
                req.name = name;
            }
            req.column_type = column_type;
            if column_type.has_options() {
                req.options = options;
            }
            let node = session.add_column(req).await?;
            print!("{}", GridView::from_table(&node).render());
        }
        SheetAction::DeleteColumn { table, column } => {
            let id = resolve_table(session, Some(&table)).await?;
            let node = session.table(&id).await?;
            let grid = GridView::from_table(&node);
            let column_id = grid
                .column(&column)
                .map(|c| c.id.clone())
                .ok_or_else(|| format!("no column {column:?}"))?;
            let node = ConfigView::from_table(&node)
                .delete_column(session, &column_id)
                .await?;
            print!("{}", GridView::from_table(&node).render());
        }
        SheetAction::AddRow { table } => {
            let id = resolve_table(session, Some(&table)).await?;
            let grid = GridView::from_table(&session.table(&id).await?);
            let node = session.add_row(&id, grid.next_row_order()).await?;
            print!("{}", GridView::from_table(&node).render());
        }
        SheetAction::DeleteRow { table, row } => {
            let id = resolve_table(session, Some(&table)).await?;
            let grid = GridView::from_table(&session.table(&id).await?);
            let row_id = grid
                .row(&row)
                .map(|r| r.id.clone())
                .ok_or_else(|| format!("no row {row:?}"))?;
            let node = session.delete_row(&id, &row_id).await?;
            print!("{}", GridView::from_table(&node).render());
        }
        SheetAction::Set {
            table,
            row,
            column,
            value,
        } => {
            let id = resolve_table(session, Some(&table)).await?;
            let grid = GridView::from_table(&session.table(&id).await?);
            let column = grid
                .column(&column)
                .ok_or_else(|| format!("no column {column:?}"))?;
            let row_id = grid
                .row(&row)
                .map(|r| r.id.clone())
                .ok_or_else(|| format!("no row {row:?}"))?;
            let current = grid.cell(&row_id, &column.id).and_then(|c| c.value.as_deref());

            match CellWidget::for_column(column).commit_input(current, &value) {
                Commit::Set(next) => {
                    let node = session.set_cell(&id, &row_id, &column.id, next).await?;
                    print!("{}", GridView::from_table(&node).render());
                }
                Commit::Skip => {
                    tracing::warn!(value = %value, column = %column.name, "value not accepted by column, nothing sent");
                }
            }
        }
    }
    Ok(())
}
