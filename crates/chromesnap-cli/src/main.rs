//! chromesnap - fetch a prebuilt Chromium snapshot build, unpack it and print
//! the path of the extracted chrome executable.
//!
//! Exit code 0: the binary path was printed to stdout. Exit code 1: download
//! or extraction failed, with a diagnostic on stderr. Progress output is drawn
//! on stderr so stdout only ever carries the final path.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use chromesnap_fetch::{
    create_unpack_dir, unzip_to_dir, ArchiveToken, FetchError, FetchJob, Flavor, SnapshotContext,
};

/// Fetch a prebuilt browser snapshot and print the extracted binary path
#[derive(Parser, Debug)]
// No clap-generated --version: -v/--version is the snapshot version flag.
#[command(name = "chromesnap", about, disable_version_flag = true)]
struct Cli {
    /// The platform archive to pull (mac, mac64, win, win64, linux, linux64,
    /// linux-arm, chromeos)
    #[arg(short, long)]
    archive: ArchiveToken,

    /// Snapshot version to fetch
    #[arg(short, long)]
    version: String,

    /// Directory the downloaded zip is written to
    #[arg(short, long)]
    directory: PathBuf,

    /// Pull Blink (WebKit) snapshots instead of Chromium
    #[arg(short = 'l', long)]
    blink: bool,
}

fn flavor_for(blink: bool) -> Flavor {
    if blink {
        Flavor::Blink
    } else {
        Flavor::Chromium
    }
}

fn download_bar(name: &str) -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}",
            )
            .unwrap()
            .progress_chars("#>-"),
    );
    bar.set_message(name.to_string());
    bar
}

fn download_failure_message(zip_path: &Path, err: &FetchError) -> String {
    format!(
        "failed to save chromium archive to {}: {}",
        zip_path.display(),
        err
    )
}

fn extract_failure_messages(zip_path: &Path, version: &str) -> (String, String) {
    (
        format!("bad zip file at {}", zip_path.display()),
        format!("are you sure the version number {} is correct?", version),
    )
}

fn download_failure(zip_path: &Path, err: &FetchError) -> ExitCode {
    log::debug!("download failed: {}", err);
    eprintln!(
        "{} {}",
        style("error:").red().bold(),
        download_failure_message(zip_path, err)
    );
    ExitCode::FAILURE
}

fn extract_failure(zip_path: &Path, version: &str, err: &FetchError) -> ExitCode {
    log::debug!("extraction failed: {}", err);
    let (first, second) = extract_failure_messages(zip_path, version);
    eprintln!("{} {}", style("error:").red().bold(), first);
    eprintln!("{}", second);
    ExitCode::FAILURE
}

async fn run(cli: Cli) -> ExitCode {
    let context = SnapshotContext::new(flavor_for(cli.blink), cli.archive, cli.version.clone());
    execute(context, &cli.directory, &cli.version).await
}

/// Fetch, unpack and print for an already-resolved context. Split out from
/// `run` so the failure paths can be driven against an arbitrary bucket root.
async fn execute(context: SnapshotContext, download_dir: &Path, version: &str) -> ExitCode {
    let zip_path = context.zip_path(download_dir);

    let job = match FetchJob::new(context.clone(), download_dir) {
        Ok(job) => job,
        Err(err) => return download_failure(&zip_path, &err),
    };

    let bar = download_bar(context.archive_name());
    let progress = bar.clone();
    let result = job
        .run(Some(move |downloaded, total| {
            if total > 0 {
                progress.set_length(total);
            }
            progress.set_position(downloaded);
        }))
        .await;
    bar.finish_and_clear();

    if let Err(err) = result {
        return download_failure(&zip_path, &err);
    }

    // The unpack directory is deliberately not cleaned up; its lifetime
    // extends past process exit.
    let unpack_dir = match create_unpack_dir() {
        Ok(dir) => dir,
        Err(err) => return extract_failure(&zip_path, version, &err),
    };
    if let Err(err) = unzip_to_dir(&zip_path, &unpack_dir) {
        return extract_failure(&zip_path, version, &err);
    }

    let binary = match context.binary_path(&unpack_dir) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("{} {}", style("error:").red().bold(), err);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", binary.display());
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    run(cli).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli =
            Cli::try_parse_from(["chromesnap", "-a", "linux64", "-v", "12345", "-d", "/tmp"])
                .unwrap();
        assert_eq!(cli.archive, ArchiveToken::Linux64);
        assert_eq!(cli.version, "12345");
        assert_eq!(cli.directory, PathBuf::from("/tmp"));
        assert!(!cli.blink);
    }

    #[test]
    fn test_parse_long_flags_with_blink() {
        let cli = Cli::try_parse_from([
            "chromesnap",
            "--archive",
            "mac64",
            "--version",
            "99999",
            "--directory",
            "/downloads",
            "--blink",
        ])
        .unwrap();
        assert_eq!(cli.archive, ArchiveToken::Mac64);
        assert!(cli.blink);
    }

    #[test]
    fn test_unknown_archive_token_is_a_usage_error() {
        let result =
            Cli::try_parse_from(["chromesnap", "-a", "solaris", "-v", "1", "-d", "/tmp"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_required_flags() {
        assert!(Cli::try_parse_from(["chromesnap"]).is_err());
        assert!(Cli::try_parse_from(["chromesnap", "-a", "linux"]).is_err());
        assert!(Cli::try_parse_from(["chromesnap", "-a", "linux", "-v", "1"]).is_err());
    }

    #[test]
    fn test_flavor_selection() {
        assert_eq!(flavor_for(false), Flavor::Chromium);
        assert_eq!(flavor_for(true), Flavor::Blink);
    }

    #[test]
    fn test_download_failure_message_names_zip_path() {
        let err = FetchError::HttpStatus {
            status: 404,
            url: "http://example.com/chrome-linux.zip".to_string(),
        };
        let message = download_failure_message(Path::new("/dl/12345-chrome-linux.zip"), &err);
        assert!(message.contains("/dl/12345-chrome-linux.zip"));
    }

    #[test]
    fn test_extract_failure_messages_name_zip_and_version() {
        let (first, second) =
            extract_failure_messages(Path::new("/dl/12345-chrome-linux.zip"), "12345");
        assert_eq!(first, "bad zip file at /dl/12345-chrome-linux.zip");
        assert_eq!(second, "are you sure the version number 12345 is correct?");
    }

    fn assert_failure(code: ExitCode) {
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
    }

    /// Serve one canned response on an ephemeral port, returning the base URL.
    fn spawn_server(status: u16, body: Vec<u8>) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();

        std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = tiny_http::Response::from_data(body)
                    .with_status_code(tiny_http::StatusCode(status));
                let _ = request.respond(response);
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_execute_fails_on_download_error() {
        let base_url = spawn_server(404, b"not found".to_vec());
        let context =
            SnapshotContext::from_base_url(&base_url, ArchiveToken::Linux64, "0").unwrap();

        let download_dir = tempfile::tempdir().unwrap();
        let code = execute(context, download_dir.path(), "0").await;
        assert_failure(code);
    }

    #[tokio::test]
    async fn test_execute_fails_on_bad_zip() {
        // A wrong version typically yields a payload that is not a zip
        let base_url = spawn_server(200, b"<Error>NoSuchKey</Error>".to_vec());
        let context =
            SnapshotContext::from_base_url(&base_url, ArchiveToken::Linux64, "99999").unwrap();

        let download_dir = tempfile::tempdir().unwrap();
        let code = execute(context, download_dir.path(), "99999").await;
        assert_failure(code);

        // The download itself succeeded; only extraction failed
        assert!(download_dir.path().join("99999-chrome-linux.zip").is_file());
    }
}
