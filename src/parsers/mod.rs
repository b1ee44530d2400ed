pub mod macro_line;
