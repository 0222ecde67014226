//! End-to-end tests of the `naimo_tools` binary: exit codes and console output

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};

use tempfile::{tempdir, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_naimo_tools"))
}

/// Empty config file so no user-level config leaks into the test
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("naimo-tools.toml"), "").unwrap();
    std::fs::write(dir.path().join("test.html"), "<p>hello</p>").unwrap();
    dir
}

fn serve_command(dir: &Path, port: u16) -> Command {
    let mut cmd = binary();
    cmd.current_dir(dir)
        .env_remove("NAIMO_SERVER_PORT")
        .env_remove("NAIMO_SERVER_ROOT")
        .args(["--config", "naimo-tools.toml", "serve", "--bind", "127.0.0.1"])
        .arg("--port")
        .arg(port.to_string())
        .arg("--root")
        .arg(dir);
    cmd
}

fn run_to_end(mut cmd: Command) -> Output {
    cmd.stdin(Stdio::null()).output().unwrap()
}

#[test]
fn test_serve_port_in_use_exits_with_one() {
    let dir = workspace();
    let holder = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = holder.local_addr().unwrap().port();

    let output = run_to_end(serve_command(dir.path(), port));
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout.contains(&format!("port {port} is already in use")),
        "stdout was: {stdout}"
    );
}

#[test]
fn test_serve_missing_root_exits_with_one() {
    let dir = workspace();
    let mut cmd = binary();
    cmd.current_dir(dir.path()).args([
        "--config",
        "naimo-tools.toml",
        "serve",
        "--bind",
        "127.0.0.1",
        "--port",
        "0",
        "--root",
        "does-not-exist",
    ]);

    let output = run_to_end(cmd);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Error: Directory not accessible"), "stdout was: {stdout}");
    assert!(!stdout.contains("already in use"));
}

#[test]
fn test_fetch_unreachable_host_still_exits_zero() {
    let dir = workspace();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut cmd = binary();
    cmd.current_dir(dir.path())
        .env_remove("GITHUB_TOKEN")
        .args(["--config", "naimo-tools.toml", "fetch", "vuejs", "vue", "main"])
        .arg("--base-url")
        .arg(format!("http://127.0.0.1:{port}"));

    let output = run_to_end(cmd);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Downloading main branch..."), "stdout was: {stdout}");
    assert!(stdout.contains("Error: Transport error"), "stdout was: {stdout}");
    assert!(!dir.path().join("vue-main.zip").exists());
}

#[tokio::test]
async fn test_fetch_missing_branch_reports_http_error_and_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vuejs/vue/archive/refs/heads/no-such-branch.zip"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = workspace();
    let mut cmd = binary();
    cmd.current_dir(dir.path())
        .env_remove("GITHUB_TOKEN")
        .args(["--config", "naimo-tools.toml", "fetch", "vuejs", "vue", "no-such-branch"])
        .arg("--base-url")
        .arg(server.uri());

    let output = tokio::task::spawn_blocking(move || run_to_end(cmd))
        .await
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stdout.contains("Downloading no-such-branch branch..."),
        "stdout was: {stdout}"
    );
    assert!(stdout.contains("HTTP error: 404 Not Found"), "stdout was: {stdout}");
    assert!(!stdout.contains("Download complete"));
    assert!(!dir.path().join("vue-no-such-branch.zip").exists());
}

#[test]
fn test_missing_config_file_reports_category_and_exits_one() {
    let dir = workspace();
    let mut cmd = binary();
    cmd.current_dir(dir.path())
        .args(["--config", "absent.toml", "serve", "--port", "0"]);

    let output = run_to_end(cmd);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr.contains("Error [config]: Configuration file not found"),
        "stderr was: {stderr}"
    );
}

/// Read banner lines until the server reports it is ready; returns the port
fn wait_for_banner(reader: &mut impl BufRead, seen: &mut String) -> u16 {
    let mut port = None;
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).unwrap();
        assert!(read > 0, "server exited before it was ready: {seen}");
        seen.push_str(&line);

        if let Some(rest) = line.split("Test page: http://").nth(1) {
            port = rest
                .split('/')
                .next()
                .and_then(|authority| authority.rsplit(':').next())
                .and_then(|p| p.trim().parse().ok());
        }
        if line.contains("Press Ctrl+C") {
            return port.expect("banner printed the port");
        }
    }
}

#[cfg(unix)]
#[test]
fn test_serve_interrupt_exits_with_zero() {
    let dir = workspace();
    let mut cmd = serve_command(dir.path(), 0);
    let mut child: Child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut reader = BufReader::new(child.stdout.take().unwrap());
    let mut stdout = String::new();
    let port = wait_for_banner(&mut reader, &mut stdout);

    // One request so the console log has a line
    let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    stream
        .write_all(b"GET /test.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("access-control-allow-origin: *"));

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    reader.read_to_string(&mut stdout).unwrap();
    let exit = child.wait().unwrap();

    assert_eq!(exit.code(), Some(0), "stdout was: {stdout}");
    assert!(stdout.contains("\"GET /test.html HTTP/1.1\" 200"), "stdout was: {stdout}");
    assert!(stdout.contains("Server stopped"), "stdout was: {stdout}");
}

#[cfg(unix)]
#[test]
fn test_interrupt_right_after_banner_exits_with_zero() {
    let dir = workspace();
    let mut cmd = serve_command(dir.path(), 0);
    let mut child: Child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut reader = BufReader::new(child.stdout.take().unwrap());
    let mut stdout = String::new();
    wait_for_banner(&mut reader, &mut stdout);

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    reader.read_to_string(&mut stdout).unwrap();
    let exit = child.wait().unwrap();

    assert_eq!(exit.code(), Some(0), "stdout was: {stdout}");
    assert!(stdout.contains("Server stopped"), "stdout was: {stdout}");
}
