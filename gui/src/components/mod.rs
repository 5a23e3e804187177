// GUI components module
pub mod detail_panel;
pub mod discounts;
pub mod filters;
pub mod product_list;
pub mod status_bar;
pub mod toolbar;

pub use detail_panel::DetailPanel;
pub use discounts::{DiscountInput, GeneralDiscounts};
pub use filters::{Filters, SheetPicker};
pub use product_list::ProductList;
pub use status_bar::StatusBar;
pub use toolbar::Toolbar;
