use crate::image::filter::{FilterPreset, MAX_FILTER_RADIUS};
use crate::image::ppm::SampleFormat;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_filter_argument(command);
        let command = Self::register_radius_argument(command);
        let command = Self::register_scale_factor_argument(command);
        Self::register_ascii_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_filter_argument(command: Command) -> Command {
        command.arg(Self::create_filter_argument())
    }

    fn register_radius_argument(command: Command) -> Command {
        command.arg(Self::create_radius_argument())
    }

    fn register_scale_factor_argument(command: Command) -> Command {
        command.arg(Self::create_scale_factor_argument())
    }

    fn register_ascii_argument(command: Command) -> Command {
        command.arg(Self::create_ascii_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PPM input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to PPM output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_filter_argument() -> Arg {
        arg!(filter: -f --filter <FILTER> "Filter to apply")
            .default_value("Grayscale")
            .value_parser(value_parser!(FilterPreset))
    }

    fn create_radius_argument() -> Arg {
        arg!(radius: -r --radius <PIXELS> "Radius of ExtendEdges and BoxBlur")
            .default_value("1")
            .value_parser(value_parser!(u64).range(1..=MAX_FILTER_RADIUS as u64))
    }

    fn create_scale_factor_argument() -> Arg {
        arg!(scale_factor: -s --scale_factor <FACTOR> "Factor of the Scale filters")
            .default_value("1.0")
            .value_parser(parse_scale_factor)
    }

    fn create_ascii_argument() -> Arg {
        arg!(ascii: -a --ascii "Write ASCII (P3) instead of binary (P6) samples")
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            filter: Self::extract_filter_argument(matches),
            radius: Self::extract_radius_argument(matches),
            scale_factor: Self::extract_scale_factor_argument(matches),
            sample_format: Self::extract_ascii_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_filter_argument(matches: &ArgMatches) -> FilterPreset {
        matches
            .get_one::<FilterPreset>("filter")
            .expect("Filter must be provided, but was unset.")
            .to_owned()
    }

    fn extract_radius_argument(matches: &ArgMatches) -> usize {
        let radius = matches
            .get_one::<u64>("radius")
            .expect("Radius must be provided, but was unset.")
            .to_owned();
        usize::try_from(radius).expect("Argument value for radius must be in range of usize")
    }

    fn extract_scale_factor_argument(matches: &ArgMatches) -> f64 {
        matches
            .get_one::<f64>("scale_factor")
            .expect("Scale factor must be provided, but was unset.")
            .to_owned()
    }

    fn extract_ascii_argument(matches: &ArgMatches) -> SampleFormat {
        if matches.get_flag("ascii") {
            SampleFormat::Ascii
        } else {
            SampleFormat::Binary
        }
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_scale_factor(value: &str) -> Result<f64, String> {
    let scale_factor = value
        .parse::<f64>()
        .map_err(|e| format!("'{}' is not a number: {}", value, e))?;
    if !(scale_factor >= 0.0 && scale_factor.is_finite()) {
        return Err(format!(
            "Scale factor must be a finite non-negative number, but was {}",
            value
        ));
    }
    Ok(scale_factor)
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::{CLIParser, FilterPreset, SampleFormat};

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "testfile.ppm";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_output_file_argument() {
        let output_file_name = "testfile.ppm";
        let command = Command::new("test");
        let command = CLIParser::register_output_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, output_file_name]);
        let output_file = CLIParser::extract_output_file_argument(&matches);
        assert_eq!(output_file.file_name().unwrap(), output_file_name);
    }

    #[test]
    fn parse_filter_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_filter_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--filter", "BoxBlur"]);
        let actual_filter = CLIParser::extract_filter_argument(&matches);
        assert_eq!(actual_filter, FilterPreset::BoxBlur);
    }

    #[test]
    fn parse_filter_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_filter_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-f", "Sharpen"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::InvalidValue);
        } else {
            panic!("Illegal value for filter not detected");
        }
    }

    #[test]
    fn parse_radius_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_radius_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--radius", "3"]);
        let radius = CLIParser::extract_radius_argument(&matches);
        assert_eq!(radius, 3);
    }

    #[test]
    fn parse_radius_zero_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_radius_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-r", "0"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Zero radius not detected");
        }
    }

    #[test]
    fn parse_radius_too_large_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_radius_argument(command);
        let result = command.try_get_matches_from(vec![
            PROGRAM_NAME_ARGUMENT,
            "--radius",
            "9223372036854775807",
        ]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Unbounded radius not detected");
        }
    }

    #[test]
    fn parse_largest_radius_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_radius_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-r", "1024"]);
        assert_eq!(CLIParser::extract_radius_argument(&matches), 1024);
    }

    #[test]
    fn parse_scale_factor_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_scale_factor_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--scale_factor", "1.5"]);
        let scale_factor = CLIParser::extract_scale_factor_argument(&matches);
        assert_eq!(scale_factor, 1.5);
    }

    #[test]
    fn parse_negative_scale_factor_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_scale_factor_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--scale_factor=-0.5"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Negative scale factor not detected");
        }
    }

    #[test]
    fn parse_ascii_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_ascii_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--ascii"]);
        assert_eq!(
            CLIParser::extract_ascii_argument(&matches),
            SampleFormat::Ascii
        );
    }

    #[test]
    fn parse_required_arguments_only() {
        let input_file_name = "inputfile.ppm";
        let input_file_path = format!("/input_directory/{}", input_file_name);
        let output_file_name = "outputfile.ppm";
        let output_file_path = format!("/output_directory/{}", output_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments =
            cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, &input_file_path, &output_file_path]);
        assert_eq!(
            arguments.input_file.file_name().unwrap(),
            input_file_name,
            "input file does not match"
        );
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            output_file_name,
            "output file does not match"
        );
        assert_eq!(
            arguments.filter,
            FilterPreset::Grayscale,
            "filter does not match"
        );
        assert_eq!(arguments.radius, 1, "radius does not match");
        assert_eq!(arguments.scale_factor, 1.0, "scale_factor does not match");
        assert_eq!(
            arguments.sample_format,
            SampleFormat::Binary,
            "sample_format does not match"
        );
    }
}
