#[cfg(all(feature = "hi", feature = "en"))]
compile_error!("Cannot enable both 'hi' and 'en' features at the same time");

#[cfg(feature = "hi")]
pub fn syntax_error_detail(error: impl std::fmt::Display) -> String {
    format!("कथन पहचाना नहीं गया: {error}")
}

#[cfg(feature = "hi")]
pub fn unparsed_input_detail(input: impl std::fmt::Display) -> String {
    format!("अतिरिक्त इनपुट: {input}")
}

#[cfg(feature = "en")]
pub fn syntax_error_detail(error: impl std::fmt::Display) -> String {
    format!("Unrecognized statement: {error}")
}

#[cfg(feature = "en")]
pub fn unparsed_input_detail(input: impl std::fmt::Display) -> String {
    format!("Unparsed input: {input}")
}

#[cfg(not(any(feature = "hi", feature = "en")))]
pub fn syntax_error_detail(error: impl std::fmt::Display) -> String {
    format!("Unrecognized statement: {error}")
}

#[cfg(not(any(feature = "hi", feature = "en")))]
pub fn unparsed_input_detail(input: impl std::fmt::Display) -> String {
    format!("Unparsed input: {input}")
}
