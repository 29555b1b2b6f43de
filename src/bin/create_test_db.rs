use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use ledgerlight::{
    NewTransaction, NewWishlistItem, UserId, create_card, create_category, create_group,
    create_transaction, create_wishlist_item, initialize_db,
};

/// A utility for creating a test database for the ledgerlight server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The ID of the user that owns the seeded transactions and wishlist items.
    #[arg(long, env = "USER_ID", default_value = "test-user")]
    user_id: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let user_id = UserId::new(args.user_id);

    println!("Creating groups, categories and cards...");

    let food = create_group("Food", &conn)?;
    let groceries = create_category("Groceries", food.id, &conn)?;
    let dining = create_category("Dining Out", food.id, &conn)?;
    let home = create_group("Home", &conn)?;
    let rent = create_category("Rent", home.id, &conn)?;
    let utilities = create_category("Utilities", home.id, &conn)?;
    let transport = create_group("Transport", &conn)?;
    let fuel = create_category("Fuel", transport.id, &conn)?;
    let visa = create_card("Visa", &conn)?;
    let debit = create_card("Debit", &conn)?;

    println!("Creating transactions for {}...", user_id.as_str());

    let today = OffsetDateTime::now_utc().date();
    let mut transaction_count = 0;

    for months_ago in 0..6 {
        let date = today - Duration::days(30 * months_ago);

        let transactions = [
            ("Supermarket", 85.40, food.id, groceries.id, Some(visa.id)),
            ("Pizza night", 32.00, food.id, dining.id, Some(visa.id)),
            ("Rent", 450.00, home.id, rent.id, None),
            ("Power bill", 120.25, home.id, utilities.id, Some(debit.id)),
            ("Petrol", 60.10, transport.id, fuel.id, Some(debit.id)),
        ];

        for (day_offset, (description, amount, group_id, category_id, card_id)) in
            (0i64..).zip(transactions)
        {
            create_transaction(
                NewTransaction {
                    date: clamp_to_month(date, day_offset),
                    description: description.to_owned(),
                    amount,
                    group_id,
                    category_id,
                    card_id,
                },
                &user_id,
                &conn,
            )?;
            transaction_count += 1;
        }
    }

    println!("Created {transaction_count} transactions.");
    println!("Creating wishlist items...");

    for (name, link, price) in [
        ("Desk lamp", Some("https://example.com/lamp"), Some(49.95)),
        ("Hiking boots", None, Some(189.00)),
        ("Houseplant", None, None),
    ] {
        create_wishlist_item(
            NewWishlistItem {
                name: name.to_owned(),
                link: link.map(str::to_owned),
                price,
            },
            &user_id,
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}

/// Move `date` back by `days`, without leaving its month.
fn clamp_to_month(date: Date, days: i64) -> Date {
    let shifted = date - Duration::days(days);

    if shifted.month() == date.month() {
        shifted
    } else {
        date
    }
}
