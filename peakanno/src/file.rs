use std::path::{Path, PathBuf};

use clap::{builder::PathBufValueParser, error::ErrorKind};

/// Path to a regular file that exists when the arguments are parsed.
#[derive(Clone, Debug)]
pub struct InputFile(pub PathBuf);

impl AsRef<Path> for InputFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl clap::builder::ValueParserFactory for InputFile {
    type Parser = InputFileParser;
    fn value_parser() -> Self::Parser {
        InputFileParser
    }
}

#[derive(Clone)]
pub struct InputFileParser;

impl clap::builder::TypedValueParser for InputFileParser {
    type Value = InputFile;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let path = PathBufValueParser::new().parse_ref(cmd, arg, value)?;
        let problem = if !path.exists() {
            Some("does not exist")
        } else if path.is_dir() {
            Some("is a directory, expected a tab-delimited file")
        } else {
            None
        };
        match problem {
            Some(problem) => Err(clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("Path {value:?} {problem}\n"),
            )
            .with_cmd(cmd)),
            None => Ok(InputFile(path)),
        }
    }
}
