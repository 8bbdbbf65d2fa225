mod serper;

pub use serper::SerperWebSearch;
