use tracing_subscriber::EnvFilter;

/// stderr 로거를 설치한다. `RUST_LOG`가 없으면 warn 이상만 출력한다.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // 테스트 등에서 두 번 호출될 수 있으므로 실패는 무시한다
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
