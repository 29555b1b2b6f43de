//! The URIs for pages and form actions.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the monthly pivot summary of transactions.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing and creating transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for listing and creating wishlist items.
pub const WISHLIST_VIEW: &str = "/wishlist";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a transaction, the ID is sent as a form field.
pub const DELETE_TRANSACTION: &str = "/api/transactions/delete";
/// The route to create a wishlist item.
pub const WISHLIST_API: &str = "/api/wishlist";
/// The route to delete a wishlist item, the ID is sent as a form field.
pub const DELETE_WISHLIST_ITEM: &str = "/api/wishlist/delete";
