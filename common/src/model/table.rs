use serde::Serialize;

/// A table the operator can pick for bulk editing, import or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    /// Table name in the store.
    pub key: &'static str,
    /// Label shown in the table selector.
    pub display_label: &'static str,
}

const fn table(key: &'static str, display_label: &'static str) -> TableDescriptor {
    TableDescriptor { key, display_label }
}

pub const EDITABLE_TABLES: [TableDescriptor; 16] = [
    table("hackathons", "האקתונים"),
    table("mentors", "מנטורים"),
    table("participants", "משתתפים"),
    table("event_managers", "מנהלי אירוע"),
    table("food_suppliers", "ספקי מזון"),
    table("food_orders", "הזמנות מזון"),
    table("shirt_suppliers", "ספקי חולצות"),
    table("shirt_orders", "הזמנות חולצות"),
    table("shirt_sizes", "מידות חולצות"),
    table("photography_suppliers", "ספקי צילום"),
    table("photography_orders", "הזמנות צילום"),
    table("printing_suppliers", "ספקי דפוס"),
    table("printing_orders", "הזמנות דפוס"),
    table("prize_suppliers", "ספקי פרסים"),
    table("prizes", "פרסים"),
    table("branding_materials", "חומרי מיתוג"),
];

pub fn find_table(key: &str) -> Option<&'static TableDescriptor> {
    EDITABLE_TABLES.iter().find(|t| t.key == key)
}
