#![forbid(unsafe_code)]

mod layouts;
mod rendering;

pub use layouts::{hero_layout, side_rail_layout};
pub use rendering::{init_tracing, parse_hex_color, render_run_result_to_png, RenderConfig};
