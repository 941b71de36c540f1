//! Alignment pipeline, rendered as a shell script.

pub mod names;
pub mod format;
pub mod stage;

use std::io::Write;
use crate::{
    Error,
    err::add_path,
};
pub use names::NameTable;
pub use format::InputFormat;
pub use stage::{Stage, Tools, AlignParams};

/// Complete pipeline for one read file.
pub struct Plan {
    names: NameTable,
    tools: Tools,
    params: AlignParams,
}

impl Plan {
    pub fn new(names: NameTable, tools: Tools, params: AlignParams) -> Self {
        Self { names, tools, params }
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Iterates over stages and their commands in the execution order.
    pub fn commands(&self) -> impl Iterator<Item = (Stage, String)> + '_ {
        Stage::ALL.iter().map(|&stage| (stage, stage.command(&self.names, &self.tools, &self.params)))
    }

    /// Renders the whole script, one command per line.
    pub fn render(&self) -> String {
        let mut script = String::new();
        for (stage, cmd) in self.commands() {
            log::debug!("    [{}] {}", stage, cmd);
            script.push_str(&cmd);
            script.push('\n');
        }
        script
    }

    /// Writes the script into the stream.
    /// Script is rendered completely before writing, so that no partial script is written on an error.
    pub fn write(&self, out: &mut impl Write) -> Result<(), Error> {
        let script = self.render();
        out.write_all(script.as_bytes()).map_err(add_path!(!))?;
        out.flush().map_err(add_path!(!))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(input: &str, unique_id: Option<&str>) -> Plan {
        Plan::new(
            NameTable::new(input, "hg18", unique_id, 9, "/tmp/wk/", "/out/"),
            Tools { aligner: "bowtie".to_string(), samtools: "samtools".to_string() },
            AlignParams { index: "/idx/hg18".to_string(), seed_len: 32, threads: 4 },
        )
    }

    #[test]
    fn stage_order() {
        for input in ["/data/a.tar.gz", "/data/a.fastq.gz", "/data/a.fastq"] {
            let plan = plan(input, None);
            let stages: Vec<_> = plan.commands().map(|(stage, _)| stage).collect();
            assert_eq!(stages, Stage::ALL);
            let script = plan.render();
            let lines: Vec<_> = script.lines().collect();
            assert!(lines[0].starts_with("mkdir "));
            assert!(lines.last().unwrap().starts_with("/bin/rm -f "));
            assert!(lines.last().unwrap().ends_with(".hg18.bwt*"));
        }
    }

    #[test]
    fn example_script() {
        let mut out = Vec::new();
        plan("/data/CGATGT.fastq.gz", Some("run7")).write(&mut out).unwrap();
        let script = String::from_utf8(out).unwrap();
        let expected = "\
mkdir /tmp/wk/bwt_run7_9/
cp /data/CGATGT.fastq.gz /tmp/wk/bwt_run7_9/run7.rawFastq.gz
gunzip /tmp/wk/bwt_run7_9/run7.rawFastq.gz
bowtie -e 70 -k 1 -m1 -n 2 -p 4 -l 32 --best --sam /idx/hg18 /tmp/wk/bwt_run7_9/run7.rawFastq > /tmp/wk/bwt_run7_9/run7.sam
/bin/rm -f /tmp/wk/bwt_run7_9/run7.rawFastq
samtools view -bS /tmp/wk/bwt_run7_9/run7.sam > /tmp/wk/bwt_run7_9/run7.bam
samtools sort /tmp/wk/bwt_run7_9/run7.bam /tmp/wk/bwt_run7_9/run7.hg18.bwt.sorted
samtools index /tmp/wk/bwt_run7_9/run7.hg18.bwt.sorted.bam
/bin/rm -f /tmp/wk/bwt_run7_9/run7.sam
mv /tmp/wk/bwt_run7_9/run7.hg18.bwt* /out/
/bin/rm -f /tmp/wk/bwt_run7_9/run7.hg18.bwt*
";
        assert_eq!(script, expected);
    }

    #[test]
    fn stage_inputs_follow_outputs() {
        let plan = plan("/data/a.fastq", Some("a"));
        let names = plan.names();
        let cmds: Vec<_> = plan.commands().map(|(_, cmd)| cmd).collect();
        // Aligner reads what the extraction produced and writes what the conversion reads.
        assert!(cmds[1].ends_with(names.scratch_input()));
        assert!(cmds[2].contains(&format!(" {} > {}", names.scratch_input(), names.align_output())));
        assert!(cmds[4].contains(&format!("{} > {}", names.align_output(), names.binary_output())));
        assert!(cmds[5].contains(names.binary_output()));
        assert!(cmds[6].ends_with(&names.sorted_bam()));
    }
}
