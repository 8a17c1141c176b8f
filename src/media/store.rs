// コンテンツアドレス式メディアストア: hash → バイト列
//
// Stores uploaded document bytes and extracted figure bitmaps on disk,
// keyed by SHA-256 hash. Handles held by Document.media / Figure.image are
// these keys.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::WorkflowError;

/// メディアキー（バイト列のSHA-256ハッシュ、小文字16進数）を計算する。
pub fn media_key(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// キーが有効な SHA-256 hex 文字列であることを検証する。
///
/// 有効なキーは正確に64文字の小文字16進数([0-9a-f])である必要がある。
/// パストラバーサルや不正なディレクトリアクセスを防止する。
fn validate_media_key(key: &str) -> crate::error::Result<()> {
    if key.len() == 64 && key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        Ok(())
    } else {
        Err(WorkflowError::media(format!(
            "invalid media key: expected 64-character lowercase hex string, got '{}'",
            key
        )))
    }
}

/// ファイルシステムベースのメディアストア。
///
/// `<media_dir>/<hex_hash>.bin` にバイト列を格納する。
pub struct MediaStore {
    media_dir: PathBuf,
}

impl MediaStore {
    /// 指定されたディレクトリをルートとして新しい MediaStore を作成する。
    pub fn new(media_dir: impl AsRef<Path>) -> Self {
        Self {
            media_dir: media_dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> crate::error::Result<PathBuf> {
        validate_media_key(key)?;
        Ok(self.media_dir.join(format!("{key}.bin")))
    }

    /// バイト列を保存し、メディアキーを返す。
    ///
    /// 書き込みはアトミック: 一時ファイルに書き込み、最後にrenameで
    /// 最終パスに移動する。同一キーが既に存在する場合は何もしない。
    pub fn put(&self, bytes: &[u8]) -> crate::error::Result<String> {
        let key = media_key(bytes);
        let path = self.key_path(&key)?;

        if path.exists() {
            return Ok(key);
        }

        fs::create_dir_all(&self.media_dir).map_err(|e| WorkflowError::media(e.to_string()))?;

        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, bytes).map_err(|e| WorkflowError::media(e.to_string()))?;
        fs::rename(&tmp_path, &path).map_err(|e| WorkflowError::media(e.to_string()))?;

        debug!(key = %key, bytes = bytes.len(), "media stored");
        Ok(key)
    }

    /// キーからバイト列を取得する。存在しない場合は None を返す。
    pub fn get(&self, key: &str) -> crate::error::Result<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|e| WorkflowError::media(e.to_string()))?;
        Ok(Some(bytes))
    }

    /// キーが存在するか確認する。
    pub fn contains(&self, key: &str) -> bool {
        match self.key_path(key) {
            Ok(path) => path.exists(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_media_key_rejects_uppercase_hex() {
        let uppercase_key = "a".repeat(58) + "ABCDEF";
        assert_eq!(uppercase_key.len(), 64);
        assert!(validate_media_key(&uppercase_key).is_err());
    }

    #[test]
    fn test_validate_media_key_accepts_lowercase_hex() {
        let lowercase_key = "a".repeat(64);
        assert!(validate_media_key(&lowercase_key).is_ok());
    }

    #[test]
    fn test_validate_media_key_rejects_wrong_length() {
        let short_key = "a".repeat(63);
        assert!(validate_media_key(&short_key).is_err());
    }

    #[test]
    fn test_media_key_is_stable() {
        assert_eq!(media_key(b"abc"), media_key(b"abc"));
        assert_ne!(media_key(b"abc"), media_key(b"abd"));
        assert_eq!(media_key(b"abc").len(), 64);
    }
}
