//! 할인 현금흐름을 CSV로 저장한다.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::budgeting::DiscountedCashFlowRow;
use crate::config::Config;

/// 기본 저장 파일명.
pub const EXPORT_FILE_NAME: &str = "discounted_cash_flows.csv";

/// CSV 헤더.
pub const EXPORT_HEADER: [&str; 2] = ["Year", "Discounted Cash Flow"];

/// 내보내기 오류. `NothingToExport`는 경고 수준이다.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no discounted cash flows available to save")]
    NothingToExport,
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    /// 실패가 아니라 사용자에게 알리기만 하면 되는 경우.
    pub fn is_warning(&self) -> bool {
        matches!(self, ExportError::NothingToExport)
    }
}

/// 설정의 저장 폴더, 없으면 다운로드 폴더(또는 ~/Downloads)에 기본 파일명을 붙인다.
pub fn default_export_path(config: &Config) -> PathBuf {
    let dir = config
        .export_dir
        .clone()
        .or_else(dirs::download_dir)
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(EXPORT_FILE_NAME)
}

/// 기간/할인 현금흐름 두 열로 CSV를 쓴다. 값은 소수 둘째 자리까지 기록한다.
///
/// 행이 없으면 파일을 만들지 않고 `NothingToExport`를 돌려준다.
pub fn export_discounted_cash_flows(
    rows: &[DiscountedCashFlowRow],
    path: &Path,
) -> Result<PathBuf, ExportError> {
    if rows.is_empty() {
        warn!(path = %path.display(), "nothing to export");
        return Err(ExportError::NothingToExport);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(EXPORT_HEADER)?;
        for row in rows {
            writer.write_record([row.period.to_string(), format!("{:.2}", row.value)])?;
        }
        writer.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    info!(path = %path.display(), rows = rows.len(), "exported discounted cash flows");
    Ok(path.to_path_buf())
}
