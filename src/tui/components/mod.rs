//! # TUI Components
//!
//! Reusable building blocks for the circuit pages.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Rebuilt every frame from the data they are handed:
//! - `TitleBar`: app name, page and status message
//! - `Sidebar`: grouped page list
//! - `BitRow`: a labelled row of bit cells, e.g. `A [1]  B [0]`
//! - `TruthTableView`: a truth table with the live row highlighted
//! - `Diagram`: box-drawing schematic
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep local state in `TuiState` and emit events:
//! - `OperandForm`: the two binary operand fields on the ripple-carry page
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TitleBar::new(app.view.label(), &app.status_message, app.ripple.policy).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! title_bar.render(frame, area); // reads from App
//! ```
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (top status bar)
//! ├── sidebar.rs        (page navigation)
//! ├── bit_row.rs        (input/output bit cells)
//! ├── truth_table.rs    (truth table widget)
//! ├── diagram.rs        (schematics)
//! └── operand_input.rs  (binary operand fields)
//! ```

pub mod bit_row;
pub mod diagram;
pub mod operand_input;
pub mod sidebar;
mod title_bar;
pub mod truth_table;

pub use bit_row::BitRow;
pub use diagram::Diagram;
pub use operand_input::{OperandEvent, OperandForm};
pub use sidebar::{SIDEBAR_WIDTH, Sidebar};
pub use title_bar::TitleBar;
pub use truth_table::TruthTableView;
