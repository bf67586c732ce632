//! Fire Productions CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, cheapest first
//! fire products list --category Acoustic --sort price-asc
//!
//! # Add two of a product and send the order
//! fire cart add 64f1c0ffee --qty 2
//! fire cart order
//!
//! # Latest three works for each service
//! fire works latest
//!
//! # Ask for a quote
//! fire contact --name Nimal --email nimal@example.lk --message "Studio treatment"
//!
//! # Admin: add a product (needs FIRE_ADMIN_TOKEN)
//! fire admin products create --title "Bass Trap" --price 12500 \
//!     --category Acoustic --image-url /api/assets/66b0c1
//! ```
//!
//! # Commands
//!
//! - `products` - List and inspect products
//! - `categories` - Show the category taxonomy
//! - `cart` - Manage the local cart and build the order link
//! - `works` - Browse portfolio works
//! - `services` - List services
//! - `contact` - Send a message through the contact form
//! - `admin` - Create, update and delete records (requires `FIRE_ADMIN_TOKEN`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use fire_productions_cli::admin::{ProductFields, ServiceFields, WorkFields, parse_price};
use fire_productions_cli::commands::products::ProductQuery;
use fire_productions_cli::commands::{admin, cart, contact, portfolio, products};
use fire_productions_cli::{AdminClient, AdminError, ApiClient, CliConfig, CliError, JsonFileStore};
use fire_productions_core::SortMode;
use fire_productions_core::portfolio::LATEST_PER_SERVICE;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fire")]
#[command(author, version, about = "Fire Productions storefront in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and inspect products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Show the category taxonomy
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse portfolio works
    Works {
        #[command(subcommand)]
        action: WorksAction,
    },
    /// List services in display order
    Services,
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(short, long)]
        message: String,
    },
    /// Create, update and delete records (requires `FIRE_ADMIN_TOKEN`)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Check the admin token
    Validate,
    /// Manage products
    Products {
        #[command(subcommand)]
        action: AdminProductsAction,
    },
    /// Manage portfolio works
    Works {
        #[command(subcommand)]
        action: AdminWorksAction,
    },
    /// Manage services
    Services {
        #[command(subcommand)]
        action: AdminServicesAction,
    },
    /// Manage categories and subcategories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
enum AdminProductsAction {
    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Change the given fields of a product
    Update {
        id: String,

        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Subcommand)]
enum AdminWorksAction {
    /// Create a work
    Create {
        #[command(flatten)]
        fields: WorkArgs,
    },
    /// Change the given fields of a work
    Update {
        id: String,

        #[command(flatten)]
        fields: WorkArgs,
    },
    /// Delete a work
    Delete { id: String },
}

#[derive(Subcommand)]
enum AdminServicesAction {
    /// Create a service
    Create {
        #[command(flatten)]
        fields: ServiceArgs,
    },
    /// Change the given fields of a service
    Update {
        id: String,

        #[command(flatten)]
        fields: ServiceArgs,
    },
    /// Delete a service
    Delete { id: String },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Create a category, or a subcategory with `--parent`
    Create {
        name: String,

        /// Id of the parent category
        #[arg(long)]
        parent: Option<String>,
    },
    /// Delete a category and its subcategories
    Delete { id: String },
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Uploaded image path or URL
    #[arg(long)]
    image_url: Option<String>,

    /// Price in LKR
    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    sub_category: Option<String>,
}

impl ProductArgs {
    fn into_fields(self) -> Result<ProductFields, AdminError> {
        Ok(ProductFields {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            price: self.price.as_deref().map(parse_price).transpose()?,
            category: self.category,
            sub_category: self.sub_category,
        })
    }
}

#[derive(Args)]
struct WorkArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Uploaded image path or URL
    #[arg(long)]
    image_url: Option<String>,

    /// External link (video, release page)
    #[arg(long)]
    link: Option<String>,

    /// Service tag (`Acoustic`, `Music`, `Films`, `Entertainment`)
    #[arg(long)]
    category: Option<String>,

    /// Extra tags; repeat or separate with commas
    #[arg(long = "tag", value_delimiter = ',')]
    tags: Vec<String>,
}

impl WorkArgs {
    fn into_fields(self) -> WorkFields {
        WorkFields {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            link: self.link,
            category: self.category,
            tags: (!self.tags.is_empty()).then_some(self.tags),
        }
    }
}

#[derive(Args)]
struct ServiceArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    image_url: Option<String>,

    /// Tag works are matched against
    #[arg(long)]
    category: Option<String>,

    /// Display position (lower first)
    #[arg(long)]
    order: Option<i64>,
}

impl ServiceArgs {
    fn into_fields(self) -> ServiceFields {
        ServiceFields {
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            category: self.category,
            order: self.order,
        }
    }
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products matching the filters
    List {
        /// Case-insensitive text matched against title and description
        #[arg(short, long)]
        query: Option<String>,

        /// Minimum price in LKR
        #[arg(long)]
        min_price: Option<String>,

        /// Top-level category
        #[arg(short, long)]
        category: Option<String>,

        /// Subcategory
        #[arg(short, long)]
        sub_category: Option<String>,

        /// Sort order (`featured`, `price-asc`, `price-desc`, `name`)
        #[arg(long, default_value = "featured")]
        sort: SortMode,
    },
    /// Show one product with a buy-now link
    Show {
        id: String,

        /// Quantity for the buy-now link (1-99)
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        id: String,

        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Increase a quantity by one
    Inc { id: String },
    /// Decrease a quantity by one (removes at zero)
    Dec { id: String },
    /// Remove a product
    Remove { id: String },
    /// Empty the cart
    Clear,
    /// Print the order message and its wa.me link
    Order,
}

#[derive(Subcommand)]
enum WorksAction {
    /// List works
    List {
        /// Only works tagged with this service
        #[arg(long)]
        service: Option<String>,
    },
    /// Show one work
    Show {
        id: String,

        /// Service tag the work was opened from
        #[arg(long)]
        service: Option<String>,
    },
    /// Most recent works for each service
    Latest {
        #[arg(long, default_value_t = LATEST_PER_SERVICE)]
        per_service: usize,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fire_productions_cli=info,fire_productions_core=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    print!("{output}");
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = CliConfig::from_env()?;
    let mut store = JsonFileStore::open(&config.state_file)?;
    let api = ApiClient::new(&config)?;

    let output = match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                query,
                min_price,
                category,
                sub_category,
                sort,
            } => {
                let query = ProductQuery {
                    query,
                    min_price,
                    category,
                    sub_category,
                    sort,
                };
                products::list(&api, &mut store, &query).await?
            }
            ProductsAction::Show { id, qty } => {
                products::show(&api, &mut store, &config, &id, qty).await?
            }
        },
        Commands::Categories => products::categories(&api).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => cart::show(&mut store),
            CartAction::Add { id, qty } => cart::add(&api, &mut store, &id, qty).await?,
            CartAction::Inc { id } => cart::change_qty(&mut store, &id, 1)?,
            CartAction::Dec { id } => cart::change_qty(&mut store, &id, -1)?,
            CartAction::Remove { id } => cart::remove(&mut store, &id)?,
            CartAction::Clear => cart::clear(&mut store),
            CartAction::Order => cart::order(&mut store, &config.whatsapp_number)?,
        },
        Commands::Works { action } => match action {
            WorksAction::List { service } => {
                portfolio::list(&api, &mut store, service.as_deref()).await?
            }
            WorksAction::Show { id, service } => {
                portfolio::show(&api, &mut store, &id, service.as_deref()).await?
            }
            WorksAction::Latest { per_service } => {
                portfolio::latest(&api, &mut store, per_service).await?
            }
        },
        Commands::Services => portfolio::services(&api, &mut store).await?,
        Commands::Contact {
            name,
            email,
            message,
        } => contact::send(&api, &name, &email, &message).await?,
        Commands::Admin { action } => {
            let client = AdminClient::new(&config)?;
            run_admin(&client, &mut store, action).await?
        }
    };

    Ok(output)
}

async fn run_admin(
    client: &AdminClient,
    store: &mut JsonFileStore,
    action: AdminAction,
) -> Result<String, CliError> {
    Ok(match action {
        AdminAction::Validate => admin::validate(client).await?,
        AdminAction::Products { action } => match action {
            AdminProductsAction::Create { fields } => {
                admin::create_product(client, &fields.into_fields()?).await?
            }
            AdminProductsAction::Update { id, fields } => {
                admin::update_product(client, &id, &fields.into_fields()?).await?
            }
            AdminProductsAction::Delete { id } => admin::delete_product(client, &id).await?,
        },
        AdminAction::Works { action } => match action {
            AdminWorksAction::Create { fields } => {
                admin::create_work(client, store, &fields.into_fields()).await?
            }
            AdminWorksAction::Update { id, fields } => {
                admin::update_work(client, store, &id, &fields.into_fields()).await?
            }
            AdminWorksAction::Delete { id } => admin::delete_work(client, store, &id).await?,
        },
        AdminAction::Services { action } => match action {
            AdminServicesAction::Create { fields } => {
                admin::create_service(client, store, &fields.into_fields()).await?
            }
            AdminServicesAction::Update { id, fields } => {
                admin::update_service(client, store, &id, &fields.into_fields()).await?
            }
            AdminServicesAction::Delete { id } => admin::delete_service(client, store, &id).await?,
        },
        AdminAction::Categories { action } => match action {
            CategoryAction::Create { name, parent } => {
                admin::create_category(client, &name, parent.as_deref()).await?
            }
            CategoryAction::Delete { id } => admin::delete_category(client, &id).await?,
        },
    })
}
