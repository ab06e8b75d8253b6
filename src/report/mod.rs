pub mod json;
pub mod text;
pub mod tsv;

pub const UNDEFINED: &str = "undefined";

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_opt_f64_6(v: Option<f64>) -> String {
    match v {
        Some(v) => format_f64_6(v),
        None => UNDEFINED.to_string(),
    }
}
