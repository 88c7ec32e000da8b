//! `products` command handlers.

use canopy_admin::AdminShell;
use canopy_client::{BulkAction, ProductBulkUpdate};
use canopy_core::{
    EntityId, EntityKind, Nose, ProductCategory, ProductFilters, SortOrder, StrainType, Vibe,
};
use clap::Subcommand;

use crate::notifier::TerminalNotifier;

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List products, optionally filtered
    List {
        #[arg(long)]
        category: Option<ProductCategory>,
        /// Matches name, description, and effects
        #[arg(long)]
        search: Option<String>,
        /// indica, sativa, or hybrid
        #[arg(long)]
        strain: Option<StrainType>,
        /// relax, energize, or balance
        #[arg(long)]
        vibe: Option<Vibe>,
        /// candy, gas, cake, funk, or sherb
        #[arg(long)]
        nose: Option<Nose>,
        /// featured, price-low, price-high, or thc
        #[arg(long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Create a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "flower")]
        category: ProductCategory,
        /// Strain or form factor, e.g. hybrid or gummies
        #[arg(long = "type", default_value = "")]
        product_type: String,
        /// Display price, e.g. "$45"
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long)]
        thca: Option<String>,
        #[arg(long)]
        dosage: Option<String>,
        /// Comma-separated
        #[arg(long)]
        terpenes: Option<String>,
        /// Comma-separated
        #[arg(long)]
        effects: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        out_of_stock: bool,
        #[arg(long, default_value = "0")]
        sort_order: i32,
    },
    /// Delete a product
    Delete { id: EntityId },
    /// Apply one action to several products in a single request
    Bulk {
        /// update, clone, or delete
        action: BulkAction,
        #[arg(required = true)]
        ids: Vec<EntityId>,
        /// For update: set stock status
        #[arg(long)]
        in_stock: Option<bool>,
        /// For update: move to category
        #[arg(long)]
        category: Option<ProductCategory>,
        /// For update: new display price
        #[arg(long)]
        price: Option<String>,
    },
}

pub(crate) async fn run(
    shell: &mut AdminShell<TerminalNotifier>,
    command: ProductCommands,
) -> anyhow::Result<()> {
    match command {
        ProductCommands::List {
            category,
            search,
            strain,
            vibe,
            nose,
            sort,
        } => {
            let filters = ProductFilters {
                category,
                search: search.unwrap_or_default(),
                strain,
                vibe,
                nose,
                sort,
            };
            let applied = filters.active_filter_count();
            shell.set_product_filters(filters);
            print_products(shell, applied);
            Ok(())
        }
        ProductCommands::Add {
            name,
            category,
            product_type,
            price,
            thca,
            dosage,
            terpenes,
            effects,
            description,
            out_of_stock,
            sort_order,
        } => {
            let draft = shell.product_panel_mut().open_modal();
            draft.name = name;
            draft.category = category;
            draft.product_type = product_type;
            draft.price = price;
            draft.thca = thca.unwrap_or_default();
            draft.dosage = dosage.unwrap_or_default();
            draft.terpenes = terpenes.unwrap_or_default();
            draft.effects = effects.unwrap_or_default();
            draft.description = description.unwrap_or_default();
            draft.in_stock = !out_of_stock;
            draft.sort_order = sort_order;
            let outcome = shell.submit_new_product().await;
            crate::finish(outcome, "product created")
        }
        ProductCommands::Delete { id } => {
            let outcome = shell.delete_product(id).await;
            crate::finish(outcome, "product deleted")
        }
        ProductCommands::Bulk {
            action,
            ids,
            in_stock,
            category,
            price,
        } => {
            for id in ids {
                if !shell.selection().is_selected(EntityKind::Products, id) {
                    shell.toggle_selection(EntityKind::Products, id);
                }
            }
            let update = ProductBulkUpdate {
                in_stock,
                category,
                price,
            };
            let outcome = shell.bulk_action(action, update).await;
            crate::finish(outcome, &format!("bulk {action} applied"))
        }
    }
}

fn print_products(shell: &AdminShell<TerminalNotifier>, applied: usize) {
    let products = shell.visible_products();
    if applied > 0 {
        println!(
            "{} of {} products • {applied} filters applied",
            products.len(),
            shell.products().len()
        );
    }
    if products.is_empty() {
        println!("no products match");
        return;
    }

    println!(
        "{:<6}{:<28}{:<10}{:<12}{:<10}STOCK",
        "ID", "NAME", "CATEGORY", "TYPE", "PRICE"
    );
    for p in products {
        println!(
            "{:<6}{:<28}{:<10}{:<12}{:<10}{}",
            p.id,
            crate::truncate(&p.name, 25),
            p.category.as_str(),
            crate::truncate(&p.product_type, 10),
            p.price,
            if p.in_stock { "in" } else { "out" }
        );
    }
}
