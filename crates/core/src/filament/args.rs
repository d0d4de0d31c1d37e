//! Sequence invocation arguments
//!
//! Decodes the `KEY=VALUE` parameter line handed to the load and unload
//! sequences. Every key is optional; an absent key means 0 / false.

use super::error::SequenceError;
use super::plan::{LoadRequest, UnloadRequest};
use super::position::FilamentPosition;

/// Arguments accepted by the load and unload sequences.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SequenceArgs {
    /// `FILAMENT_POS`, float-encoded [`FilamentPosition`]
    pub filament_pos: Option<FilamentPosition>,
    /// `LENGTH` (mm)
    pub length: f32,
    /// `FULL`
    pub full: bool,
    /// `HOME_EXTRUDER`
    pub home_extruder: bool,
    /// `SKIP_EXTRUDER`
    pub skip_extruder: bool,
    /// `EXTRUDER_ONLY`
    pub extruder_only: bool,
    /// `PARK_POS` (mm)
    pub park_pos: f32,
}

impl SequenceArgs {
    /// Parse a whitespace separated `KEY=VALUE` line.
    ///
    /// Keys are case-insensitive. Flags accept any number, non-zero is true.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::UnknownArgument`] for keys outside the set above
    /// - [`SequenceError::InvalidArgument`] for values that are not numbers
    /// - [`SequenceError::InvalidPosition`] for a `FILAMENT_POS` that does not
    ///   name a state
    pub fn parse(line: &str) -> Result<Self, SequenceError> {
        let mut args = Self::default();

        for token in line.split_whitespace() {
            let (key, value) = token
                .split_once('=')
                .ok_or(SequenceError::UnknownArgument)?;

            if key.eq_ignore_ascii_case("FILAMENT_POS") {
                let encoded = parse_number("FILAMENT_POS", value)?;
                args.filament_pos = Some(FilamentPosition::from_encoded(encoded)?);
            } else if key.eq_ignore_ascii_case("LENGTH") {
                args.length = parse_number("LENGTH", value)?;
            } else if key.eq_ignore_ascii_case("FULL") {
                args.full = parse_flag("FULL", value)?;
            } else if key.eq_ignore_ascii_case("HOME_EXTRUDER") {
                args.home_extruder = parse_flag("HOME_EXTRUDER", value)?;
            } else if key.eq_ignore_ascii_case("SKIP_EXTRUDER") {
                args.skip_extruder = parse_flag("SKIP_EXTRUDER", value)?;
            } else if key.eq_ignore_ascii_case("EXTRUDER_ONLY") {
                args.extruder_only = parse_flag("EXTRUDER_ONLY", value)?;
            } else if key.eq_ignore_ascii_case("PARK_POS") {
                args.park_pos = parse_number("PARK_POS", value)?;
            } else {
                return Err(SequenceError::UnknownArgument);
            }
        }

        Ok(args)
    }

    /// Current position, `UNLOADED` when not supplied.
    pub fn position(&self) -> FilamentPosition {
        self.filament_pos.unwrap_or(FilamentPosition::Unloaded)
    }

    /// Load request described by these arguments.
    pub fn load_request(&self) -> LoadRequest {
        LoadRequest {
            length: self.length,
            full: self.full,
            home_extruder: self.home_extruder,
            skip_extruder: self.skip_extruder,
            extruder_only: self.extruder_only,
        }
    }

    /// Unload request described by these arguments.
    pub fn unload_request(&self) -> UnloadRequest {
        UnloadRequest {
            length: self.length,
            extruder_only: self.extruder_only,
            park_pos: self.park_pos,
        }
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f32, SequenceError> {
    value
        .parse::<f32>()
        .map_err(|_| SequenceError::InvalidArgument(key))
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, SequenceError> {
    parse_number(key, value).map(|v| v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_line_gives_defaults() {
        let args = SequenceArgs::parse("").unwrap();
        assert_eq!(args, SequenceArgs::default());
        assert_eq!(args.filament_pos, None);
        assert_eq!(args.position(), FilamentPosition::Unloaded);
        assert!(!args.load_request().home_extruder);
    }

    #[test]
    fn test_parse_load_line() {
        let args =
            SequenceArgs::parse("FILAMENT_POS=4.0 LENGTH=712.5 FULL=1 HOME_EXTRUDER=1 SKIP_EXTRUDER=0")
                .unwrap();
        assert_eq!(args.position(), FilamentPosition::EndBowden);

        let request = args.load_request();
        assert_eq!(request.length, 712.5);
        assert!(request.full);
        assert!(request.home_extruder);
        assert!(!request.skip_extruder);
        assert!(!request.extruder_only);
    }

    #[test]
    fn test_parse_unload_line_is_case_insensitive() {
        let args = SequenceArgs::parse("filament_pos=7 extruder_only=1 park_pos=35").unwrap();
        let request = args.unload_request();
        assert_eq!(args.position(), FilamentPosition::PastExtruder);
        assert!(request.extruder_only);
        assert_eq!(request.park_pos, 35.0);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            SequenceArgs::parse("LENGTH=abc"),
            Err(SequenceError::InvalidArgument("LENGTH"))
        );
        assert_eq!(
            SequenceArgs::parse("SPEED=100"),
            Err(SequenceError::UnknownArgument)
        );
        assert_eq!(
            SequenceArgs::parse("FULL"),
            Err(SequenceError::UnknownArgument)
        );
        assert_eq!(
            SequenceArgs::parse("FILAMENT_POS=12"),
            Err(SequenceError::InvalidPosition(12.0))
        );
    }
}
