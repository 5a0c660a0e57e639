// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{CliError, CliResult, CliTypedResult};
use serde::{de::DeserializeOwned, Serialize};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::{
    env,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Log level used when `RUST_LOG` is not set
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Starts the logger on stderr, so that stdout stays a single JSON document.
///
/// Calling it more than once is a no-op.
pub fn start_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Prompts for confirmation until a yes or no is given explicitly
pub fn prompt_yes(prompt: &str) -> bool {
    loop {
        println!("{} [yes/no] >", prompt);
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            continue;
        }
        match input.trim().to_lowercase().as_str() {
            "yes" | "y" => return true,
            "no" | "n" => return false,
            _ => continue,
        }
    }
}

/// Reads a line from input
pub fn read_line(input_name: &str) -> CliTypedResult<String> {
    let mut input_buf = String::new();
    let _ = std::io::stdin()
        .read_line(&mut input_buf)
        .map_err(|err| CliError::IO(input_name.to_string(), err))?;

    Ok(input_buf)
}

/// Convert an empty response to Success
pub fn to_common_success_result(
    command: &str,
    start_time: Instant,
    result: CliTypedResult<()>,
) -> CliResult {
    to_common_result(command, start_time, result.map(|()| "Success"))
}

/// For pretty printing outputs in JSON
pub fn to_common_result<T: Serialize>(
    command: &str,
    start_time: Instant,
    result: CliTypedResult<T>,
) -> CliResult {
    let latency = start_time.elapsed();
    match &result {
        Ok(_) => info!(command = command, latency_ms = latency.as_millis() as u64, "Command succeeded"),
        Err(err) => info!(
            command = command,
            latency_ms = latency.as_millis() as u64,
            error = err.to_str(),
            "Command failed"
        ),
    }

    let is_err = result.is_err();
    let result: ResultWrapper<T> = result.into();
    let string = serde_json::to_string_pretty(&result)
        .unwrap_or_else(|err| format!("{{\"Error\": \"Failed to serialize output: {}\"}}", err));
    if is_err {
        Err(string)
    } else {
        Ok(string)
    }
}

/// A result wrapper for displaying either a correct execution result or an error.
///
/// The purpose of this is to have a pretty easy to recognize JSON output format e.g.
///
/// {
///   "Result":{
///     "transaction_hash":"0x..."
///   }
/// }
///
/// {
///   "Error":"Failed to run command"
/// }
///
#[derive(Debug, Serialize)]
enum ResultWrapper<T> {
    Result(T),
    Error(String),
}

impl<T> From<CliTypedResult<T>> for ResultWrapper<T> {
    fn from(result: CliTypedResult<T>) -> Self {
        match result {
            Ok(inner) => ResultWrapper::Result(inner),
            Err(inner) => ResultWrapper::Error(inner.to_string()),
        }
    }
}

pub fn write_to_user_only_file(path: &Path, name: &str, bytes: &[u8]) -> CliTypedResult<()> {
    let mut opts = OpenOptions::new();
    #[cfg(unix)]
    opts.mode(0o600);
    let mut file = opts
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| CliError::IO(name.to_string(), e))?;
    file.write_all(bytes)
        .map_err(|e| CliError::IO(name.to_string(), e))
}

pub fn read_from_file(path: &Path) -> CliTypedResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| CliError::IO(path.display().to_string(), e))
}

pub fn create_dir_if_not_exist(dir: &Path) -> CliTypedResult<()> {
    // Check if the directory exists, if it's not a dir, it will also fail here
    if !dir.exists() || !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|e| CliError::IO(dir.display().to_string(), e))?;
        debug!("Created {} folder", dir.display());
    } else {
        debug!("{} folder already exists", dir.display());
    }
    Ok(())
}

pub fn current_dir() -> CliTypedResult<PathBuf> {
    env::current_dir().map_err(|err| {
        CliError::UnexpectedError(format!("Failed to get current directory {}", err))
    })
}

pub fn to_yaml<T: Serialize + ?Sized>(input: &T) -> CliTypedResult<String> {
    Ok(serde_yaml::to_string(input)?)
}

pub fn from_yaml<T: DeserializeOwned>(input: &str) -> CliTypedResult<T> {
    Ok(serde_yaml::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_wrapped() {
        let ok = to_common_result("Test", Instant::now(), Ok(5u64)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&ok).unwrap();
        assert_eq!(value["Result"], serde_json::json!(5));

        let err = to_common_result::<u64>(
            "Test",
            Instant::now(),
            Err(CliError::CommandArgumentError("bad flag".to_string())),
        )
        .unwrap_err();
        let value: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(value["Error"], serde_json::json!("Invalid arguments: bad flag"));

        let success = to_common_success_result("Test", Instant::now(), Ok(())).unwrap();
        assert!(success.contains("Success"));
    }

    #[test]
    fn user_only_files_are_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file");
        create_dir_if_not_exist(path.parent().unwrap()).unwrap();

        write_to_user_only_file(&path, "file", b"first version").unwrap();
        write_to_user_only_file(&path, "file", b"second").unwrap();
        assert_eq!(read_from_file(&path).unwrap(), b"second");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
