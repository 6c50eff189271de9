//! Netlist parsing.
//!
//! A netlist describes a circuit as one device per line:
//!
//! ```text
//! # RC low-pass driven by an external waveform
//! GROUND      gnd
//! VOLTAGE_IN  vin  n1 gnd
//! RESISTOR    r1   n1 n2  1k
//! CAPACITOR   c1   n2 gnd 1u
//! VOLTAGE_OUT vout n2 gnd
//! ```
//!
//! Token 0 is the device kind, token 1 the device name; the remaining
//! tokens are kind-specific. Values accept the unit suffixes of
//! [`value::parse_value`]. Blank lines and `#` comments are ignored.

mod reader;
mod value;

pub use reader::{clean, clean_lines};
pub use value::parse_value;

use crate::components::Component;
use crate::error::Result;

/// Parse a netlist source into its component list, in declaration order.
pub fn parse(input: &str) -> Result<Vec<Component>> {
    clean_lines(input)
        .map(|(line_no, line)| Component::from_netlist_line(&line, line_no))
        .collect()
}

/// Parse a netlist file.
///
/// The file handle is held only for the duration of the read.
pub fn parse_file(path: &std::path::Path) -> Result<Vec<Component>> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::StompError::NetlistRead {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StompError;

    #[test]
    fn test_parse_voltage_divider() {
        let netlist = "\
GROUND gnd
VOLTAGE_IN vin n1 gnd
RESISTOR r1 n1 n2 1k
RESISTOR r2 n2 gnd 1k
VOLTAGE_OUT vout n2 gnd
";
        let components = parse(netlist).unwrap();
        assert_eq!(components.len(), 5);
        assert_eq!(components[2].name(), "r1");
    }

    #[test]
    fn test_parse_reports_original_line_numbers() {
        let netlist = "# title\n\nGROUND gnd\nWIDGET w1 a b\n";
        let err = parse(netlist).unwrap_err();
        assert!(matches!(
            err,
            StompError::UnknownDevice { line: 4, .. }
        ));
    }

    #[test]
    fn test_parse_empty_source() {
        assert!(parse("# only comments\n\n").unwrap().is_empty());
    }
}
