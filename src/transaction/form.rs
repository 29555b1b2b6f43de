//! The form fields submitted to create or delete a transaction, and their validation.

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{
    Error,
    database_id::DatabaseId,
    form::{FormFields, optional, parse_id, parse_number, required},
    transaction::NewTransaction,
};

/// The card select value that means the transaction was not paid with a card.
pub const NO_CARD: &str = "none";

/// The raw form data for creating a transaction.
///
/// All fields are kept as text so that rejected submissions can be echoed back as entered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Either a card ID, [NO_CARD] or blank.
    #[serde(default)]
    pub card_id: Option<String>,
}

impl TransactionForm {
    /// Check the submitted fields and convert them into a [NewTransaction].
    ///
    /// # Errors
    /// Returns the first problem found, in field order:
    /// - [Error::MissingField] if date, description, amount, group or category is absent or blank,
    /// - [Error::InvalidDate] if the date is not formatted as `YYYY-MM-DD`,
    /// - [Error::InvalidNumber] if the amount is not a finite number,
    /// - [Error::InvalidId] if a group, category or card reference is not an integer.
    pub fn validate(&self) -> Result<NewTransaction, Error> {
        let date = parse_date(required(&self.date, "Date")?)?;
        let description = required(&self.description, "Description")?.to_owned();
        let amount = parse_number(required(&self.amount, "Amount")?, "Amount")?;
        let group_id = parse_id(required(&self.group_id, "Group")?, "Group")?;
        let category_id = parse_id(required(&self.category_id, "Category")?, "Category")?;
        let card_id = match optional(&self.card_id) {
            None | Some(NO_CARD) => None,
            Some(card_id) => Some(parse_id(card_id, "Card")?),
        };

        Ok(NewTransaction {
            date,
            description,
            amount,
            group_id,
            category_id,
            card_id,
        })
    }
}

impl FormFields for TransactionForm {
    fn field_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Date", self.date.as_deref()),
            ("Description", self.description.as_deref()),
            ("Amount", self.amount.as_deref()),
            ("Group", self.group_id.as_deref()),
            ("Category", self.category_id.as_deref()),
            ("Card", self.card_id.as_deref()),
        ]
    }
}

/// The raw form data for deleting a transaction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DeleteTransactionForm {
    #[serde(default)]
    pub id: Option<String>,
}

impl DeleteTransactionForm {
    /// Get the ID of the transaction to delete.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if the ID is absent or blank, or [Error::InvalidId] if it is
    /// not an integer.
    pub fn validate(&self) -> Result<DatabaseId, Error> {
        parse_id(required(&self.id, "Transaction ID")?, "Transaction ID")
    }
}

impl FormFields for DeleteTransactionForm {
    fn field_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("Transaction ID", self.id.as_deref())]
    }
}

fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Error, transaction::NewTransaction};

    use super::{DeleteTransactionForm, NO_CARD, TransactionForm};

    fn valid_form() -> TransactionForm {
        TransactionForm {
            date: Some("2024-03-05".to_owned()),
            description: Some("Supermarket".to_owned()),
            amount: Some("-42.10".to_owned()),
            group_id: Some("1".to_owned()),
            category_id: Some("2".to_owned()),
            card_id: Some("3".to_owned()),
        }
    }

    #[test]
    fn validate_accepts_complete_form() {
        assert_eq!(
            valid_form().validate(),
            Ok(NewTransaction {
                date: date!(2024 - 03 - 05),
                description: "Supermarket".to_owned(),
                amount: -42.10,
                group_id: 1,
                category_id: 2,
                card_id: Some(3),
            })
        );
    }

    #[test]
    fn validate_treats_sentinel_and_blank_card_as_no_card() {
        for card_id in [Some(NO_CARD.to_owned()), Some("".to_owned()), None] {
            let form = TransactionForm {
                card_id,
                ..valid_form()
            };

            assert_eq!(form.validate().map(|transaction| transaction.card_id), Ok(None));
        }
    }

    #[test]
    fn validate_rejects_non_numeric_amount() {
        let form = TransactionForm {
            amount: Some("abc".to_owned()),
            ..valid_form()
        };

        let error = form.validate().unwrap_err();

        assert_eq!(
            error,
            Error::InvalidNumber {
                field: "Amount",
                value: "abc".to_owned()
            }
        );
        assert_eq!(error.to_string(), "Amount must be a valid number");
    }

    #[test]
    fn validate_rejects_missing_group() {
        let form = TransactionForm {
            group_id: None,
            ..valid_form()
        };

        assert_eq!(form.validate(), Err(Error::MissingField("Group")));
    }

    #[test]
    fn validate_rejects_missing_category() {
        let form = TransactionForm {
            category_id: Some(" ".to_owned()),
            ..valid_form()
        };

        assert_eq!(form.validate(), Err(Error::MissingField("Category")));
    }

    #[test]
    fn validate_rejects_missing_date_description_and_amount() {
        let cases = [
            (
                TransactionForm {
                    date: None,
                    ..valid_form()
                },
                "Date",
            ),
            (
                TransactionForm {
                    description: None,
                    ..valid_form()
                },
                "Description",
            ),
            (
                TransactionForm {
                    amount: None,
                    ..valid_form()
                },
                "Amount",
            ),
        ];

        for (form, field) in cases {
            assert_eq!(form.validate(), Err(Error::MissingField(field)));
        }
    }

    #[test]
    fn validate_rejects_malformed_date() {
        let form = TransactionForm {
            date: Some("05/03/2024".to_owned()),
            ..valid_form()
        };

        assert_eq!(
            form.validate(),
            Err(Error::InvalidDate("05/03/2024".to_owned()))
        );
    }

    #[test]
    fn validate_rejects_non_integer_card() {
        let form = TransactionForm {
            card_id: Some("visa".to_owned()),
            ..valid_form()
        };

        assert_eq!(
            form.validate(),
            Err(Error::InvalidId {
                field: "Card",
                value: "visa".to_owned()
            })
        );
    }

    #[test]
    fn delete_form_requires_id() {
        assert_eq!(
            DeleteTransactionForm { id: None }.validate(),
            Err(Error::MissingField("Transaction ID"))
        );
        assert_eq!(
            DeleteTransactionForm {
                id: Some("12".to_owned())
            }
            .validate(),
            Ok(12)
        );
    }

    #[test]
    fn blank_submitted_field_is_missing() {
        let form: TransactionForm =
            serde_html_form::from_str("date=2024-03-05&description=&amount=5").unwrap();

        assert_eq!(form.description.as_deref(), Some(""));
        assert_eq!(form.validate(), Err(Error::MissingField("Description")));
    }
}
