//! Table view for the monthly pivot summary.

use maud::{Markup, html};

use crate::{
    dashboard::pivot::Pivot,
    html::{TABLE_CELL_STYLE, TABLE_ROW_STYLE, format_currency},
};

// Table cell styles for the pivot table
const TABLE_HEADER_CELL_STYLE: &str = "px-3 py-3 text-center min-w-[100px]";
const TABLE_HEADER_FIRST_CELL_STYLE: &str =
    "px-3 py-3 sticky left-0 bg-gray-100 dark:bg-gray-700 z-10 font-semibold";
const TABLE_STICKY_CELL_STYLE: &str = "px-3 py-4 font-medium text-gray-900 dark:text-white \
    sticky left-0 bg-white dark:bg-gray-800 z-10";
const TABLE_DATA_CELL_STYLE: &str = "text-center whitespace-nowrap";
const TABLE_GROUP_ROW_STYLE: &str = "bg-gray-50 border-b dark:bg-gray-700 dark:border-gray-600 \
    font-semibold";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

fn amount_cell(amount: f64) -> Markup {
    html! {
        td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (amount_color_class(amount))} {
            (format_currency(amount))
        }
    }
}

/// Renders the pivot as a table with one column per month, most recent first.
///
/// Each group gets a subtotal row followed by a row per category. The footer holds the total
/// for each month across all groups.
pub(super) fn pivot_table(pivot: &Pivot) -> Markup {
    let table = &pivot.table;

    html! {
        div class="overflow-x-auto rounded-lg shadow" {
            table id="pivot-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                thead class="text-xs text-gray-900 uppercase bg-gray-100 dark:bg-gray-700 dark:text-gray-400" {
                    tr {
                        th scope="col" class={(TABLE_HEADER_FIRST_CELL_STYLE) " text-left"} {
                            "Group / Category"
                        }
                        @for month in &pivot.months {
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) data-month=(month.key) {
                                (month.name)
                            }
                        }
                    }
                }

                tbody {
                    @for group in table.groups() {
                        tr class=(TABLE_GROUP_ROW_STYLE) data-group=(group) {
                            th scope="row" class={(TABLE_STICKY_CELL_STYLE) " text-left"} {
                                (group)
                            }
                            @for month in &pivot.months {
                                (amount_cell(table.group_total(group, &month.key)))
                            }
                        }

                        @for category in table.categories(group) {
                            tr class=(TABLE_ROW_STYLE) data-category=(category) {
                                th scope="row" class={(TABLE_STICKY_CELL_STYLE) " text-left pl-8 font-normal"} {
                                    (category)
                                }
                                @for month in &pivot.months {
                                    (amount_cell(table.amount_or_zero(group, category, &month.key)))
                                }
                            }
                        }
                    }
                }

                tfoot {
                    tr class="font-bold text-gray-900 dark:text-white bg-gray-100 dark:bg-gray-700" {
                        th scope="row" class={(TABLE_HEADER_FIRST_CELL_STYLE) " text-left"} {
                            "Total"
                        }
                        @for month in &pivot.months {
                            (amount_cell(table.month_total(&month.key)))
                        }
                    }
                }
            }
        }
    }
}
