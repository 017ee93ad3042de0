mod checkbox;
mod table;
mod text_field;

pub use checkbox::Checkbox;
pub use table::{ColumnDef, Table, TableEvent, TableRow};
pub use text_field::{TextField, TextFieldEvent};
