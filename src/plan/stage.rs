//! Shell commands for each step of the alignment pipeline.

use std::fmt::{self, Write};
use crate::ext::fmt::shell;
use super::{
    names::NameTable,
    format::InputFormat,
};

/// `tar` removes this many leading components from archived file names.
const TAR_STRIP_COMPONENTS: u32 = 5;

/// External executables.
#[derive(Clone, Debug)]
pub struct Tools {
    /// Bowtie aligner.
    pub aligner: String,
    /// Samtools.
    pub samtools: String,
}

/// Aligner parameters that vary between runs.
#[derive(Clone, Debug)]
pub struct AlignParams {
    /// Path to the bowtie index (without extensions).
    pub index: String,
    /// Seed length, passed to bowtie as is.
    pub seed_len: u32,
    pub threads: u16,
}

/// Pipeline step. Each step uses output of the previous steps, therefore, the order is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    CreateScratch,
    MaterializeReads,
    Align,
    RemoveReads,
    SamToBam,
    Sort,
    Index,
    RemoveSam,
    Relocate,
    Cleanup,
}

impl Stage {
    /// All stages in the execution order.
    pub const ALL: [Stage; 10] = [
        Stage::CreateScratch,
        Stage::MaterializeReads,
        Stage::Align,
        Stage::RemoveReads,
        Stage::SamToBam,
        Stage::Sort,
        Stage::Index,
        Stage::RemoveSam,
        Stage::Relocate,
        Stage::Cleanup,
    ];

    pub fn to_str(self) -> &'static str {
        match self {
            Self::CreateScratch => "create scratch directory",
            Self::MaterializeReads => "extract reads",
            Self::Align => "align",
            Self::RemoveReads => "remove reads",
            Self::SamToBam => "convert to BAM",
            Self::Sort => "sort",
            Self::Index => "index",
            Self::RemoveSam => "remove SAM",
            Self::Relocate => "move results",
            Self::Cleanup => "clean up",
        }
    }

    /// Renders shell command(s) for this stage. Multiple commands are separated by a newline.
    pub fn command(self, names: &NameTable, tools: &Tools, params: &AlignParams) -> String {
        match self {
            Self::CreateScratch => format!("mkdir {}", shell(names.scratch_dir())),
            Self::MaterializeReads => materialize_reads(names),
            Self::Align => align(names, tools, params),
            Self::RemoveReads => format!("/bin/rm -f {}", shell(names.scratch_input())),
            Self::SamToBam => format!("{} view -bS {} > {}", shell(&tools.samtools),
                shell(names.align_output()), shell(names.binary_output())),
            Self::Sort => format!("{} sort {} {}", shell(&tools.samtools),
                shell(names.binary_output()), shell(names.sorted_prefix())),
            Self::Index => format!("{} index {}", shell(&tools.samtools), shell(&names.sorted_bam())),
            Self::RemoveSam => format!("/bin/rm -f {}", shell(names.align_output())),
            // Glob must stay outside of the quotes.
            Self::Relocate => format!("mv {}* {}", shell(names.group_header()), shell(names.final_dir())),
            Self::Cleanup => format!("/bin/rm -f {}*", shell(names.group_header())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

fn materialize_reads(names: &NameTable) -> String {
    let input = shell(names.input_file());
    let scratch_input = names.scratch_input();
    let format = InputFormat::classify(names.input_file());
    log::debug!("Input reads {} are treated as {}", names.input_file(), format);
    match format {
        InputFormat::Archive => format!("tar --strip-components {} --to-stdout -xzvf {} > {}",
            TAR_STRIP_COMPONENTS, input, shell(scratch_input)),
        InputFormat::Compressed => {
            let gz = shell(&format!("{}.gz", scratch_input)).into_owned();
            format!("cp {} {}\ngunzip {}", input, gz, gz)
        }
        InputFormat::Raw => format!("cp {} {}", input, shell(scratch_input)),
    }
}

fn align(names: &NameTable, tools: &Tools, params: &AlignParams) -> String {
    let mut s = String::new();
    write!(s, "{}", shell(&tools.aligner)).unwrap();
    write!(s, concat!(
        " -e 70", // Maximal sum of mismatch qualities,
        " -k 1",  // Report 1 alignment per read,
        " -m1",   // Discard reads with more than one alignment,
        " -n 2",  // At most 2 mismatches in the seed,
        )).unwrap();
    write!(s, " -p {} -l {}", params.threads, params.seed_len).unwrap();
    write!(s, " --best --sam {} {} > {}", shell(&params.index),
        shell(names.scratch_input()), shell(names.align_output())).unwrap();
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> Tools {
        Tools {
            aligner: "/usr/local/bowtie-0.12.8/bowtie".to_string(),
            samtools: "samtools".to_string(),
        }
    }

    fn params() -> AlignParams {
        AlignParams {
            index: "/genomes/hg18/bowtie/hg18".to_string(),
            seed_len: 28,
            threads: 4,
        }
    }

    fn names(input: &str) -> NameTable {
        NameTable::new(input, "hg18", Some("run7"), 17, "/tmp/wk/", "/out/")
    }

    fn render(stage: Stage, input: &str) -> String {
        stage.command(&names(input), &tools(), &params())
    }

    #[test]
    fn materialize_variants() {
        assert_eq!(render(Stage::MaterializeReads, "/data/reads.tar.gz"),
            "tar --strip-components 5 --to-stdout -xzvf /data/reads.tar.gz > /tmp/wk/bwt_run7_17/run7.rawFastq");
        assert_eq!(render(Stage::MaterializeReads, "/data/CGATGT.fastq.gz"),
            "cp /data/CGATGT.fastq.gz /tmp/wk/bwt_run7_17/run7.rawFastq.gz\n\
            gunzip /tmp/wk/bwt_run7_17/run7.rawFastq.gz");
        assert_eq!(render(Stage::MaterializeReads, "/data/CGATGT.txt"),
            "cp /data/CGATGT.txt /tmp/wk/bwt_run7_17/run7.rawFastq");
    }

    #[test]
    fn align_command() {
        assert_eq!(render(Stage::Align, "/data/CGATGT.fastq.gz"),
            "/usr/local/bowtie-0.12.8/bowtie -e 70 -k 1 -m1 -n 2 -p 4 -l 28 --best --sam \
            /genomes/hg18/bowtie/hg18 /tmp/wk/bwt_run7_17/run7.rawFastq > /tmp/wk/bwt_run7_17/run7.sam");
    }

    #[test]
    fn samtools_commands() {
        let input = "/data/CGATGT.fastq";
        assert_eq!(render(Stage::SamToBam, input),
            "samtools view -bS /tmp/wk/bwt_run7_17/run7.sam > /tmp/wk/bwt_run7_17/run7.bam");
        assert_eq!(render(Stage::Sort, input),
            "samtools sort /tmp/wk/bwt_run7_17/run7.bam /tmp/wk/bwt_run7_17/run7.hg18.bwt.sorted");
        assert_eq!(render(Stage::Index, input),
            "samtools index /tmp/wk/bwt_run7_17/run7.hg18.bwt.sorted.bam");
    }

    #[test]
    fn removal_and_relocation() {
        let input = "/data/CGATGT.fastq";
        assert_eq!(render(Stage::CreateScratch, input), "mkdir /tmp/wk/bwt_run7_17/");
        assert_eq!(render(Stage::RemoveReads, input), "/bin/rm -f /tmp/wk/bwt_run7_17/run7.rawFastq");
        assert_eq!(render(Stage::RemoveSam, input), "/bin/rm -f /tmp/wk/bwt_run7_17/run7.sam");
        assert_eq!(render(Stage::Relocate, input), "mv /tmp/wk/bwt_run7_17/run7.hg18.bwt* /out/");
        assert_eq!(render(Stage::Cleanup, input), "/bin/rm -f /tmp/wk/bwt_run7_17/run7.hg18.bwt*");
    }

    #[test]
    fn glob_outside_quotes() {
        let names = NameTable::new("my reads.fq", "hg18", None, 3, "/tmp/my wk", "/out dir");
        let cmd = Stage::Relocate.command(&names, &tools(), &params());
        assert_eq!(cmd, "mv '/tmp/my wk/bwt_my reads.fq_3/my reads.fq.hg18.bwt'* '/out dir/'");
    }
}
