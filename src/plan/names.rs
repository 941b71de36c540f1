//! File and directory names, used throughout a single alignment run.

use rand::Rng;

/// Extensions that are removed from the read file name, when the identity is derived from it.
/// Order matters: `.tar.gz` must go before `.gz`.
pub const KNOWN_EXTENSIONS: [&'static str; 6] = [".tar.gz", ".txt", ".fastq", ".fasta", ".gz", ".zip"];

/// Removes every occurrence of every known extension, until nothing changes.
pub fn strip_extensions(name: &str) -> String {
    let mut name = name.to_owned();
    loop {
        let mut stripped = name.clone();
        for ext in KNOWN_EXTENSIONS.iter() {
            stripped = stripped.replace(ext, "");
        }
        if stripped == name {
            return name;
        }
        name = stripped;
    }
}

/// Returns the last `/`-separated component of the path.
fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Appends `/` to a non-empty directory path, unless it is already there.
fn as_dir(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') {
        path.to_owned()
    } else {
        format!("{}/", path)
    }
}

/// Scratch tokens are drawn from `1..=DEF_MAX_TOKEN` by default.
pub const DEF_MAX_TOKEN: u32 = 10000;

/// All paths of a single run. Constructed once, never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameTable {
    input_file: String,
    identity: String,
    scratch_dir: String,
    scratch_input: String,
    align_output: String,
    binary_output: String,
    sorted_prefix: String,
    group_header: String,
    final_dir: String,
}

impl NameTable {
    /// Builds all names from an explicit scratch `token`.
    /// If `unique_id` is not provided, identity is derived from the read file name.
    pub fn new(
        input_file: &str,
        genome: &str,
        unique_id: Option<&str>,
        token: u32,
        scratch_parent: &str,
        final_dir: &str,
    ) -> Self {
        let identity = match unique_id {
            Some(id) => id.to_owned(),
            None => strip_extensions(basename(input_file)),
        };
        let scratch_dir = format!("{}bwt_{}_{}/", as_dir(scratch_parent), identity, token);
        let stem = format!("{}{}", scratch_dir, identity);
        let group_header = format!("{}.{}.bwt", stem, genome);
        Self {
            input_file: input_file.to_owned(),
            scratch_input: format!("{}.rawFastq", stem),
            align_output: format!("{}.sam", stem),
            binary_output: format!("{}.bam", stem),
            sorted_prefix: format!("{}.sorted", group_header),
            group_header,
            final_dir: as_dir(final_dir),
            identity,
            scratch_dir,
        }
    }

    /// Same as `new`, but draws scratch token from `1..=max_token`.
    pub fn resolve(
        input_file: &str,
        genome: &str,
        unique_id: Option<&str>,
        scratch_parent: &str,
        final_dir: &str,
        max_token: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let token = rng.gen_range(1..=max_token.max(1));
        Self::new(input_file, genome, unique_id, token, scratch_parent, final_dir)
    }

    /// Read file, as provided by the user.
    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    /// Run name: unique ID or the read file name without extensions.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Scratch directory, always ends with `/`.
    pub fn scratch_dir(&self) -> &str {
        &self.scratch_dir
    }

    /// Uncompressed reads inside the scratch directory.
    pub fn scratch_input(&self) -> &str {
        &self.scratch_input
    }

    /// SAM file, produced by the aligner.
    pub fn align_output(&self) -> &str {
        &self.align_output
    }

    /// Unsorted BAM file.
    pub fn binary_output(&self) -> &str {
        &self.binary_output
    }

    /// Output prefix for `samtools sort`, which appends `.bam` itself.
    pub fn sorted_prefix(&self) -> &str {
        &self.sorted_prefix
    }

    /// Sorted BAM file, as produced by `samtools sort`.
    pub fn sorted_bam(&self) -> String {
        format!("{}.bam", self.sorted_prefix)
    }

    /// Common prefix of all artifacts that are moved to the final directory.
    pub fn group_header(&self) -> &str {
        &self.group_header
    }

    /// Output directory, ends with `/` unless empty.
    pub fn final_dir(&self) -> &str {
        &self.final_dir
    }
}
