/// UI layer: panels (controls), tables, and plots.

pub mod central;
pub mod panels;
pub mod plot;
pub mod table;
