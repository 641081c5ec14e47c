//! Regex patterns for work-order report extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Work-order number after its label
    pub static ref WO_NUMBER: Regex = Regex::new(
        r"WO Number: (\d+)"
    ).unwrap();

    // Facility code: FM + 4 digits
    pub static ref FACILITY_CODE: Regex = Regex::new(
        r"(FM\d{4})"
    ).unwrap();

    // Facility location: rest of the line after the code and one space
    pub static ref FACILITY_LOCATION: Regex = Regex::new(
        r"FM\d{4} (.+)"
    ).unwrap();

    // Date token: DD.DD.DDDD, shape only
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"(\d{2}\.\d{2}\.\d{4})"
    ).unwrap();
}
