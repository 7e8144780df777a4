//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread::JoinHandle;
use tempfile::TempDir;

/// A config directory for one CLI invocation
pub struct TestConfig {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestConfig {
  /// Empty config dir: no config.toml, no credentials
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Config dir with a valid credentials.toml
  pub fn logged_in() -> Result<Self> {
    let config = Self::new()?;
    config.write_file(
      "credentials.toml",
      "macaroon = \"test-root-macaroon\"\ndischarge = \"test-discharge\"\n",
    )?;
    Ok(config)
  }

  /// Write a file into the config dir
  pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(name), content)?;
    Ok(())
  }
}

/// The request the fake store received
#[derive(Debug)]
pub struct CapturedRequest {
  pub request_line: String,
  pub headers: Vec<(String, String)>,
  pub body: String,
}

impl CapturedRequest {
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(name))
      .map(|(_, v)| v.as_str())
  }
}

/// A store that answers exactly one request with a canned response
///
/// Plain blocking `TcpListener` rather than an async mock server such as `wiremock`:
/// the binary makes a single `Content-Length` request per run, so the tests stay
/// synchronous and need no tokio runtime. Chunked or repeated requests are not supported.
pub struct FakeStore {
  pub url: String,
  handle: JoinHandle<Result<CapturedRequest>>,
}

impl FakeStore {
  /// Serve `body` with HTTP `status` to the first connection
  pub fn serve(status: u16, body: impl Into<String>) -> Result<Self> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);
    let body = body.into();

    let handle = std::thread::spawn(move || -> Result<CapturedRequest> {
      let (stream, _) = listener.accept().context("Fake store accept failed")?;
      let mut reader = BufReader::new(stream.try_clone()?);

      let mut request_line = String::new();
      reader.read_line(&mut request_line)?;

      let mut headers = Vec::new();
      loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
          break;
        }
        if let Some((name, value)) = line.split_once(':') {
          headers.push((name.trim().to_string(), value.trim().to_string()));
        }
      }

      let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .map(|(_, v)| v.parse::<usize>())
        .transpose()?
        .unwrap_or(0);
      let mut raw_body = vec![0u8; length];
      reader.read_exact(&mut raw_body)?;

      let mut stream = stream;
      write!(
        stream,
        "HTTP/1.1 {} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
      )?;
      stream.flush()?;

      Ok(CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(raw_body)?,
      })
    });

    Ok(Self { url, handle })
  }

  /// Wait for the request to have been served and return it
  pub fn request(self) -> Result<CapturedRequest> {
    self
      .handle
      .join()
      .map_err(|_| anyhow::anyhow!("Fake store thread panicked"))?
  }
}

/// Run the snapcraft binary with an isolated config dir and store URL
pub fn run_snapcraft_raw(config: &Path, store_url: Option<&str>, args: &[&str]) -> Result<Output> {
  let snapcraft_bin = env!("CARGO_BIN_EXE_snapcraft");

  let mut command = Command::new(snapcraft_bin);
  command
    .args(args)
    .env("SNAPCRAFT_CONFIG_DIR", config)
    .env_remove("SNAPCRAFT_STORE_URL")
    .env_remove("RUST_LOG");
  for proxy in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
    command.env_remove(proxy);
  }
  if let Some(url) = store_url {
    command.env("SNAPCRAFT_STORE_URL", url);
  }

  command.output().context("Failed to run snapcraft")
}

/// Run the snapcraft binary and fail unless it succeeds
pub fn run_snapcraft(config: &Path, store_url: Option<&str>, args: &[&str]) -> Result<Output> {
  let output = run_snapcraft_raw(config, store_url, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "snapcraft command failed: snapcraft {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Stdout split into lines
pub fn stdout_lines(output: &Output) -> Vec<String> {
  String::from_utf8_lossy(&output.stdout).lines().map(String::from).collect()
}

/// Summary line exactly as the CLI highlights it
pub fn green(text: &str) -> String {
  format!("\x1b[32m{}\x1b[0m", text)
}
