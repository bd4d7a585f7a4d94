//! Canvas sizing and placement of the header, the dice row and the footer.

pub mod solver;
