//! CLI entry point for the moneta client.
//!
//! Loads `./config.yaml`, initializes logging, wires the session-expired
//! hook, and dispatches a single command.

use std::sync::Arc;

use inline_colorization::*;

use moneta::api::{reports, transactions};
use moneta::config::{load_config, print_schema};
use moneta::currency::{Currency, CurrencyPreference};
use moneta::gateway::ApiGateway;
use moneta::models::TransactionFilter;
use moneta::session::{reconcile, Navigation, SessionStore};
use moneta::storage::create_store;
use moneta::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    // `schema` must work even without a config file present.
    if args.get(1).map(String::as_str) == Some("schema") {
        print_schema();
        return;
    }

    let config = load_config();
    init_logging(&config.logging);

    let store = create_store(&config.store);
    let gateway = Arc::new(ApiGateway::new(&config.api, store.clone()));
    let session = Arc::new(SessionStore::new(gateway.clone(), store.clone()));
    let currency = CurrencyPreference::new(store);

    // Forced logout on any 401: reset the session. A CLI has no login page
    // to navigate to, so the hook just tells the user.
    {
        let session = session.clone();
        gateway.set_session_expired_hook(Arc::new(move || {
            session.invalidate();
            eprintln!("{color_yellow}Session expired; please log in again.{color_reset}");
        }));
    }

    let outcome = match args.get(1).map(String::as_str) {
        Some("register") => cmd_register(&session, &args).await,
        Some("login") => cmd_login(&session, &args).await,
        Some("whoami") => cmd_whoami(&session).await,
        Some("logout") => {
            session.logout();
            println!("Logged out.");
            Ok(())
        }
        Some("oauth") => cmd_oauth(&session, &args),
        Some("oauth-callback") => cmd_oauth_callback(&session, &args).await,
        Some("transactions") => cmd_transactions(&gateway, &currency).await,
        Some("summary") => cmd_summary(&gateway, &currency).await,
        Some("currency") => cmd_currency(&currency, &args),
        _ => {
            usage();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{color_red}Error:{color_reset} {}", e);
        std::process::exit(1);
    }
}

fn usage() {
    println!("Usage: moneta <command>");
    println!();
    println!("  register <email> <password>   Create an account and log in");
    println!("  login <email> <password>      Log in with credentials");
    println!("  whoami                        Show the logged-in user");
    println!("  logout                        Clear the stored token");
    println!("  oauth <google|github>         Print the provider sign-in URL");
    println!("  oauth-callback <query>        Complete an OAuth redirect");
    println!("  transactions                  List the first page of transactions");
    println!("  summary                       Show income/expense totals");
    println!("  currency [USD|VND]            Show or set the display currency");
    println!("  schema                        Print the config JSON schema");
}

fn credentials(args: &[String]) -> Result<(&str, &str), String> {
    match (args.get(2), args.get(3)) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err("expected: <email> <password>".to_string()),
    }
}

async fn cmd_register(session: &SessionStore, args: &[String]) -> Result<(), String> {
    let (email, password) = credentials(args)?;
    session
        .register(email, password)
        .await
        .map_err(|e| e.to_string())?;
    println!("{color_green}Registered and logged in as {}.{color_reset}", email);
    Ok(())
}

async fn cmd_login(session: &SessionStore, args: &[String]) -> Result<(), String> {
    let (email, password) = credentials(args)?;
    session
        .login(email, password)
        .await
        .map_err(|e| e.to_string())?;
    println!("{color_green}Logged in as {}.{color_reset}", email);
    Ok(())
}

async fn cmd_whoami(session: &SessionStore) -> Result<(), String> {
    session.bootstrap().await;
    match session.state().user {
        Some(user) => {
            println!(
                "{color_green}{}{color_reset} (id {}, registered {})",
                user.email,
                user.id,
                user.created_at.date_naive()
            );
            Ok(())
        }
        None => Err("not logged in".to_string()),
    }
}

fn cmd_oauth(session: &SessionStore, args: &[String]) -> Result<(), String> {
    let url = match args.get(2).map(String::as_str) {
        Some("google") => session.google_auth_url(),
        Some("github") => session.github_auth_url(),
        _ => return Err("expected: google or github".to_string()),
    };
    println!("Open this URL in a browser to sign in:");
    println!("  {style_bold}{}{style_reset}", url);
    println!("Then pass the redirect's query string to `moneta oauth-callback`.");
    Ok(())
}

async fn cmd_oauth_callback(session: &SessionStore, args: &[String]) -> Result<(), String> {
    let query = args.get(2).ok_or("expected: <query string>")?;
    match reconcile(session, query).await {
        Navigation::Home => {
            let email = session
                .state()
                .user
                .map(|user| user.email)
                .unwrap_or_else(|| "?".to_string());
            println!("{color_green}Signed in as {}.{color_reset}", email);
            Ok(())
        }
        Navigation::Login { error } => {
            Err(error.unwrap_or_else(|| "sign-in failed".to_string()))
        }
    }
}

async fn cmd_transactions(
    gateway: &ApiGateway,
    currency: &CurrencyPreference,
) -> Result<(), String> {
    let page = transactions::list(gateway, &TransactionFilter::default())
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "{} of {} transaction(s), page {}/{}:",
        page.items.len(),
        page.total,
        page.page,
        page.pages.max(1)
    );
    for tx in &page.items {
        let kind = tx
            .category
            .as_ref()
            .map(|c| c.category_type.as_str())
            .unwrap_or("-");
        println!(
            "  {}  {:<7}  {:>14}  {}",
            tx.date.date_naive(),
            kind,
            currency.format(tx.amount),
            tx.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn cmd_summary(gateway: &ApiGateway, currency: &CurrencyPreference) -> Result<(), String> {
    // Both reports are independent; fetch them concurrently.
    let (summary, by_category) = futures::future::try_join(
        reports::summary(gateway, None, None),
        reports::by_category(gateway, None, None),
    )
    .await
    .map_err(|e| e.to_string())?;

    println!("{style_bold}Income:{style_reset}  {color_green}{}{color_reset}", currency.format(summary.total_income));
    println!("{style_bold}Expense:{style_reset} {color_red}{}{color_reset}", currency.format(summary.total_expense));
    println!("{style_bold}Balance:{style_reset} {}", currency.format(summary.balance));

    if !by_category.expense_categories.is_empty() {
        println!();
        println!("Top expense categories:");
        for cat in &by_category.expense_categories {
            println!(
                "  {:<20} {:>14}  ({:.1}%)",
                cat.category_name,
                currency.format(cat.total),
                cat.percentage
            );
        }
    }
    Ok(())
}

fn cmd_currency(currency: &CurrencyPreference, args: &[String]) -> Result<(), String> {
    match args.get(2) {
        None => {
            println!("Display currency: {}", currency.current().code());
            Ok(())
        }
        Some(code) => {
            let parsed = Currency::from_code(code)
                .ok_or_else(|| format!("unsupported currency '{}'; valid: USD, VND", code))?;
            currency.set(parsed)?;
            println!("Display currency set to {}.", parsed.code());
            Ok(())
        }
    }
}
