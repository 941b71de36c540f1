//! Executables, scratch location and genome indices.

use std::{
    collections::BTreeMap,
    path::Path,
};
use crate::{
    Error,
    err::error,
    ext,
    plan::{names::DEF_MAX_TOKEN, stage::Tools},
};

/// The object can be serialized and deserialized into JSON.
pub trait JsonSer: Sized {
    fn save(&self) -> json::JsonValue;

    fn load(obj: &json::JsonValue) -> Result<Self, Error>;
}

/// Returns string value under the key, if present.
fn get_str<'a>(obj: &'a json::JsonValue, key: &str) -> Result<Option<&'a str>, Error> {
    let val = &obj[key];
    if val.is_null() {
        Ok(None)
    } else {
        val.as_str().map(Some).ok_or_else(|| error!(ParsingError, "Key '{}' must contain a string, found {}", key, val))
    }
}

pub const DEF_ALIGNER: &'static str = "/usr/local/bowtie-0.12.8/bowtie";
pub const DEF_SAMTOOLS: &'static str = "samtools";
pub const DEF_SCRATCH: &'static str = "/mnt/d0-0/share/bradnerlab/projects/anna/BOWTIE_TEMP/";
const DEF_GENOMES: [(&'static str, &'static str); 1] = [
    ("hg18", "/mnt/d0-0/share/bradnerlab/genomes/human_gp_mar_06_no_random/bowtie/hg18"),
];

/// Configuration of the script generator.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bowtie executable.
    pub aligner: String,
    /// Samtools executable.
    pub samtools: String,
    /// Scratch directories are created here.
    pub scratch_parent: String,
    /// Scratch directory tokens are drawn from `1..=max_token`.
    pub max_token: u32,
    /// Genome name (lowercase) -> bowtie index prefix.
    genomes: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aligner: DEF_ALIGNER.to_owned(),
            samtools: DEF_SAMTOOLS.to_owned(),
            scratch_parent: DEF_SCRATCH.to_owned(),
            max_token: DEF_MAX_TOKEN,
            genomes: DEF_GENOMES.iter().map(|(name, index)| (name.to_string(), index.to_string())).collect(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let obj = ext::sys::load_json(path)?;
        let config = Self::load(&obj)?;
        log::debug!("Loaded configuration from {} ({} genomes)", ext::fmt::path(path), config.genomes.len());
        Ok(config)
    }

    /// Adds new genome, or replaces an existing one. Genome names are case-insensitive.
    pub fn add_genome(&mut self, name: &str, index: impl Into<String>) {
        self.genomes.insert(name.to_lowercase(), index.into());
    }

    /// Iterates over genome names and corresponding indices.
    pub fn genomes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.genomes.iter().map(|(name, index)| (name.as_str(), index.as_str()))
    }

    /// Returns the bowtie index for the genome.
    pub fn bowtie_index(&self, genome: &str) -> Result<&str, Error> {
        self.genomes.get(&genome.to_lowercase()).map(String::as_str)
            .ok_or_else(|| Error::UnknownGenome(genome.to_owned(), self.genomes.keys().cloned().collect()))
    }

    pub fn tools(&self) -> Tools {
        Tools {
            aligner: self.aligner.clone(),
            samtools: self.samtools.clone(),
        }
    }
}

impl JsonSer for Config {
    fn save(&self) -> json::JsonValue {
        let mut genomes = json::JsonValue::new_object();
        for (name, index) in self.genomes.iter() {
            genomes[name.as_str()] = index.as_str().into();
        }
        json::object!{
            aligner: self.aligner.as_str(),
            samtools: self.samtools.as_str(),
            scratch_parent: self.scratch_parent.as_str(),
            max_token: self.max_token,
            genomes: genomes,
        }
    }

    /// Missing keys keep their default values; `genomes`, if present, replaces the default genome table.
    fn load(obj: &json::JsonValue) -> Result<Self, Error> {
        if !obj.is_object() {
            return Err(error!(ParsingError, "Configuration must be a JSON object, found {}", obj));
        }
        let mut config = Self::default();
        if let Some(val) = get_str(obj, "aligner")? {
            config.aligner = val.to_owned();
        }
        if let Some(val) = get_str(obj, "samtools")? {
            config.samtools = val.to_owned();
        }
        if let Some(val) = get_str(obj, "scratch_parent")? {
            config.scratch_parent = val.to_owned();
        }
        let max_token = &obj["max_token"];
        if !max_token.is_null() {
            config.max_token = max_token.as_u32().filter(|&v| v > 0)
                .ok_or_else(|| error!(ParsingError, "Key 'max_token' must contain a positive integer, found {}",
                    max_token))?;
        }

        let genomes = &obj["genomes"];
        if !genomes.is_null() {
            if !genomes.is_object() {
                return Err(error!(ParsingError, "Key 'genomes' must contain an object, found {}", genomes));
            }
            config.genomes.clear();
            for (name, index) in genomes.entries() {
                let index = index.as_str().ok_or_else(||
                    error!(ParsingError, "Index of genome '{}' must be a string, found {}", name, index))?;
                config.add_genome(name, index);
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lookup() {
        let config = Config::default();
        assert!(config.bowtie_index("hg18").unwrap().ends_with("/bowtie/hg18"));
        assert_eq!(config.bowtie_index("HG18").unwrap(), config.bowtie_index("hg18").unwrap());
        match config.bowtie_index("mm10") {
            Err(Error::UnknownGenome(genome, available)) => {
                assert_eq!(genome, "mm10");
                assert_eq!(available, vec!["hg18".to_string()]);
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn load_partial() {
        let obj = json::parse(r#"{
            "samtools": "/opt/samtools-0.1.18/samtools",
            "genomes": { "MM9": "/genomes/mm9/bowtie/mm9" }
        }"#).unwrap();
        let config = Config::load(&obj).unwrap();
        assert_eq!(config.aligner, DEF_ALIGNER);
        assert_eq!(config.samtools, "/opt/samtools-0.1.18/samtools");
        assert_eq!(config.max_token, DEF_MAX_TOKEN);
        assert_eq!(config.bowtie_index("mm9").unwrap(), "/genomes/mm9/bowtie/mm9");
        assert!(config.bowtie_index("hg18").is_err());
    }

    #[test]
    fn load_saved() {
        let mut config = Config::default();
        config.max_token = 500;
        config.add_genome("mm9", "/genomes/mm9");
        let loaded = Config::load(&config.save()).unwrap();
        assert_eq!(loaded.max_token, 500);
        assert_eq!(loaded.genomes().collect::<Vec<_>>(), config.genomes().collect::<Vec<_>>());
    }

    #[test]
    fn load_errors() {
        assert!(Config::load(&json::parse("[1, 2]").unwrap()).is_err());
        assert!(Config::load(&json::parse(r#"{"aligner": 5}"#).unwrap()).is_err());
        assert!(Config::load(&json::parse(r#"{"max_token": 0}"#).unwrap()).is_err());
        assert!(Config::load(&json::parse(r#"{"genomes": {"hg19": 1}}"#).unwrap()).is_err());
    }
}
