pub mod wca;
