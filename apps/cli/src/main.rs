//! # Counter POS CLI
//!
//! Interactive single-operator terminal front-end over the billing
//! session.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Counter CLI                                      │
//! │                                                                         │
//! │  stdin commands ───► BillingSession ───► SQLite (app_records)          │
//! │                           │                                             │
//! │                           ▼                                             │
//! │                  text receipt / stats on stdout                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use chrono::Local;
use counter_core::{render_text, Money};
use counter_db::{BillingSession, LocalStore, StoreConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  items                       list the catalog
  additem <name> [price] [stock]   add a catalog item (price like 80.00)
  delitem <id>                remove a catalog item
  add <id>                    add one unit to the cart
  qty <id> <n>                set a line's quantity (0 removes it)
  price <id> <amount>         set a line's unit price
  remove <id>                 remove a cart line
  cart                        show the cart
  clear                       abandon the cart
  customer <name>             set the customer name (blank = walk-in)
  checkout                    complete the sale and print the receipt
  stats                       show the dashboard
  history                     list recorded sales
  reprint <sale-id>           reprint a recorded receipt
  settings                    show the active settings
  set name <text>             set the store name
  set footer <text>           set the footer message
  set headers on|off          toggle the receipt table headers
  set stock on|off            toggle stock enforcement
  clear-history               delete all recorded sales
  help                        this text
  quit                        exit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let db_path = std::env::args().nth(1).unwrap_or_else(|| "counter.db".to_string());
    let store = LocalStore::open(StoreConfig::new(&db_path)).await?;
    let mut session = BillingSession::open(store).await?;

    println!("Counter POS — {} (type 'help' for commands)", db_path);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.trim().splitn(2, ' ').collect();
        let (command, rest) = (parts.first().copied().unwrap_or(""), parts.get(1).copied().unwrap_or(""));

        let result = run_command(&mut session, command, rest.trim()).await;
        match result {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => println!("error: {err}"),
        }
    }

    Ok(())
}

/// Executes one command; returns `Ok(true)` to exit.
async fn run_command(
    session: &mut BillingSession,
    command: &str,
    rest: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        "" => {}
        "help" => println!("{HELP}"),
        "quit" | "exit" => return Ok(true),

        "items" => {
            if session.items().is_empty() {
                println!("(catalog is empty)");
            }
            for item in session.items() {
                let price = item
                    .price_cents
                    .map(|c| Money::from_cents(c).to_string())
                    .unwrap_or_else(|| "-".to_string());
                let stock = item
                    .stock
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "untracked".to_string());
                println!("{}  {}  price {}  stock {}", item.id, item.name, price, stock);
            }
        }
        "additem" => {
            let mut words = rest.split_whitespace().collect::<Vec<_>>();
            let mut stock = None;
            let mut price = None;
            // Trailing numeric tokens are price then stock.
            if words.len() >= 3 {
                if let Some(last) = words.last().and_then(|w| w.parse::<i64>().ok()) {
                    stock = Some(last);
                    words.pop();
                }
            }
            if words.len() >= 2 {
                if let Some(last) = words.last().copied().and_then(parse_amount) {
                    price = Some(last);
                    words.pop();
                }
            }
            let name = words.join(" ");
            let item = session.add_catalog_item(&name, price, stock)?;
            println!("added {} ({})", item.name, item.id);
        }
        "delitem" => {
            session.remove_catalog_item(rest)?;
            println!("removed");
        }

        "add" => {
            session.add_to_cart(rest)?;
            print_cart(session);
        }
        "qty" => {
            let (id, n) = split_pair(rest)?;
            session.set_quantity(id, n.parse()?)?;
            print_cart(session);
        }
        "price" => {
            let (id, amount) = split_pair(rest)?;
            let cents = parse_amount(amount).ok_or("price must look like 80.00")?;
            session.set_price(id, cents)?;
            print_cart(session);
        }
        "remove" => {
            session.remove_line(rest)?;
            print_cart(session);
        }
        "cart" => print_cart(session),
        "clear" => {
            session.clear_cart();
            println!("cart cleared");
        }
        "customer" => {
            session.set_customer_name(rest)?;
            println!("customer: {}", if rest.is_empty() { "(walk-in)" } else { rest });
        }

        "checkout" => {
            let now = Local::now();
            let sale = session.complete_sale(&now).await?;
            println!("--- sale {} ---", sale.id);
            print!("{}", render_text(&sale.receipt));
        }

        "stats" => {
            let stats = session.stats(&Local::now());
            println!(
                "today: {} sales, {}",
                stats.today.sale_count,
                stats.today.revenue()
            );
            println!(
                "week:  {} sales, {}",
                stats.week.sale_count,
                stats.week.revenue()
            );
            println!(
                "month: {} sales, {}",
                stats.month.sale_count,
                stats.month.revenue()
            );
            println!(
                "all:   {} sales, {} (avg {}, {} items sold)",
                stats.all_time.sale_count,
                stats.all_time.revenue(),
                stats.average_sale(),
                stats.items_sold
            );
            for (rank, top) in session.top_items(5).iter().enumerate() {
                println!(
                    "  #{} {} — {} sold, {}",
                    rank + 1,
                    top.name,
                    top.quantity,
                    Money::from_cents(top.revenue_cents)
                );
            }
        }
        "history" => {
            if session.history().is_empty() {
                println!("(no sales recorded)");
            }
            for sale in session.history() {
                println!(
                    "{}  {}  {} items  {}",
                    sale.id,
                    sale.customer,
                    sale.item_count,
                    sale.total()
                );
            }
        }
        "reprint" => match session.find_sale(rest) {
            Some(sale) => print!("{}", render_text(&sale.receipt)),
            None => println!("no sale with id {rest}"),
        },
        "clear-history" => {
            session.clear_history().await?;
            println!("history cleared");
        }

        "settings" => {
            let s = session.settings();
            println!("store:    {} / {} / {}", s.store_name, s.store_address, s.store_phone);
            println!("footer:   {} (shown: {})", s.footer_message, s.show_footer);
            println!("headers:  {}", s.show_table_headers);
            println!("stock:    enforced: {}", s.enforce_stock);
            println!("formats:  {:?} {:?}", s.date_format, s.time_format);
        }
        "set" => {
            let (key, value) = split_pair(rest)?;
            let mut settings = session.settings().clone();
            match key {
                "name" => settings.store_name = value.to_string(),
                "footer" => settings.footer_message = value.to_string(),
                "headers" => settings.show_table_headers = parse_toggle(value)?,
                "stock" => settings.enforce_stock = parse_toggle(value)?,
                other => return Err(format!("unknown setting: {other}").into()),
            }
            session.update_settings(settings).await?;
            println!("saved");
        }

        other => {
            error!(command = other, "Unknown command");
            println!("unknown command: {other} (try 'help')");
        }
    }

    Ok(false)
}

fn print_cart(session: &BillingSession) {
    if session.cart().is_empty() {
        println!("(cart is empty)");
        return;
    }
    for line in session.cart_lines() {
        println!(
            "{}  {} × {} @ {} = {}",
            line.item_id,
            line.name,
            line.quantity,
            Money::from_cents(line.unit_price_cents),
            line.line_total()
        );
    }
    println!("total: {}", session.cart().total());
}

/// Parses a decimal amount like `80` or `80.00` into cents.
fn parse_amount(input: &str) -> Option<i64> {
    let input = input.trim();
    let (major, minor) = match input.split_once('.') {
        None => (input, "0"),
        Some((major, minor)) => (major, minor),
    };

    let major: i64 = major.parse().ok()?;
    if major < 0 || minor.len() > 2 || minor.chars().any(|c| !c.is_ascii_digit()) {
        return None;
    }
    let minor: i64 = if minor.is_empty() { 0 } else { minor.parse().ok()? };
    let minor = if input.split_once('.').map(|(_, m)| m.len()) == Some(1) {
        minor * 10
    } else {
        minor
    };

    Some(major * 100 + minor)
}

fn parse_toggle(value: &str) -> Result<bool, String> {
    match value {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(format!("expected on|off, got {other}")),
    }
}

fn split_pair(rest: &str) -> Result<(&str, &str), String> {
    rest.split_once(' ')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| "expected two arguments".to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("80.00"), Some(8000));
        assert_eq!(parse_amount("80"), Some(8000));
        assert_eq!(parse_amount("80.5"), Some(8050));
        assert_eq!(parse_amount("0.99"), Some(99));
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount("80.999"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_parse_toggle() {
        assert_eq!(parse_toggle("on"), Ok(true));
        assert_eq!(parse_toggle("off"), Ok(false));
        assert!(parse_toggle("maybe").is_err());
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("i1 3"), Ok(("i1", "3")));
        assert!(split_pair("solo").is_err());
    }
}
