//! Database query for the transaction fields the dashboard pivot needs.

use rusqlite::Connection;
use time::{Date, macros::format_description};

use crate::{Error, dashboard::pivot::PivotTransaction, user::UserId};

/// Gets the transactions owned by `user_id` with their group and category names, most recent
/// first.
///
/// The date is read as text so that a row with a malformed date still makes it into the pivot,
/// under the invalid month.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query preparation or execution fails.
pub(super) fn get_pivot_transactions(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<PivotTransaction>, Error> {
    connection
        .prepare(
            "SELECT t.date, t.amount, g.name, c.name
            FROM transactions t
            LEFT JOIN groups g ON g.id = t.group_id
            LEFT JOIN categories c ON c.id = t.category_id
            WHERE t.user_id = ?1
            ORDER BY t.date DESC",
        )?
        .query_map((user_id.as_str(),), |row| {
            let date: Option<String> = row.get(0)?;

            Ok(PivotTransaction {
                date: date.as_deref().and_then(parse_date),
                amount: row.get(1)?,
                group: row.get(2)?,
                category: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<PivotTransaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        lookup::{create_category, create_group},
        transaction::{NewTransaction, create_transaction},
        user::UserId,
    };

    use super::get_pivot_transactions;

    #[test]
    fn resolves_names_and_tolerates_bad_dates() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user_id = UserId::new("user-1");
        let group = create_group("Food", &connection).unwrap();
        let category = create_category("Groceries", group.id, &connection).unwrap();
        create_transaction(
            NewTransaction {
                date: date!(2024 - 03 - 05),
                description: "Supermarket".to_owned(),
                amount: 10.0,
                group_id: group.id,
                category_id: category.id,
                card_id: None,
            },
            &user_id,
            &connection,
        )
        .unwrap();
        connection
            .execute(
                "INSERT INTO transactions (date, description, amount, user_id, created_at)
                 VALUES ('not a date', 'Mystery', 2.0, 'user-1', '2024-01-01 00:00:00')",
                (),
            )
            .unwrap();

        let transactions = get_pivot_transactions(&user_id, &connection).unwrap();

        assert_eq!(transactions.len(), 2);
        // "not a date" sorts after "2024-03-05" so it comes first in descending order.
        assert_eq!(transactions[0].date, None);
        assert_eq!(transactions[0].group, None);
        assert_eq!(transactions[0].amount, Some(2.0));
        assert_eq!(transactions[1].date, Some(date!(2024 - 03 - 05)));
        assert_eq!(transactions[1].group.as_deref(), Some("Food"));
        assert_eq!(transactions[1].category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn only_returns_rows_for_user() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute(
                "INSERT INTO transactions (date, description, amount, user_id, created_at)
                 VALUES ('2024-01-01', 'Other', 2.0, 'user-2', '2024-01-01 00:00:00')",
                (),
            )
            .unwrap();

        let transactions = get_pivot_transactions(&UserId::new("user-1"), &connection).unwrap();

        assert!(transactions.is_empty());
    }
}
