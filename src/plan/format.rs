use std::fmt;

/// Packaging of the input read file, recognized by its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Tar archive (gzip compressed).
    Archive,
    /// Gzip compressed file.
    Compressed,
    /// Plain text reads.
    Raw,
}

impl InputFormat {
    /// Classifies the read file: any path containing `tar` (case-insensitive) is an archive,
    /// otherwise the last extension `gz` means gzip compression.
    pub fn classify(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.contains("tar") {
            Self::Archive
        } else if lower.rsplit('.').next() == Some("gz") {
            Self::Compressed
        } else {
            Self::Raw
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Compressed => "compressed",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_wins_over_gz() {
        assert_eq!(InputFormat::classify("reads.tar.gz"), InputFormat::Archive);
        assert_eq!(InputFormat::classify("/data/READS.TAR.GZ"), InputFormat::Archive);
        // Substring check covers directories too.
        assert_eq!(InputFormat::classify("/mnt/tarballs/reads.fastq"), InputFormat::Archive);
    }

    #[test]
    fn compressed_and_raw() {
        assert_eq!(InputFormat::classify("/data/CGATGT.fastq.gz"), InputFormat::Compressed);
        assert_eq!(InputFormat::classify("/data/CGATGT.fastq.GZ"), InputFormat::Compressed);
        assert_eq!(InputFormat::classify("/data/CGATGT.fastq"), InputFormat::Raw);
        assert_eq!(InputFormat::classify("/data/CGATGT.gzip"), InputFormat::Raw);
        assert_eq!(InputFormat::classify("gz"), InputFormat::Compressed);
        assert_eq!(InputFormat::classify(""), InputFormat::Raw);
    }
}
