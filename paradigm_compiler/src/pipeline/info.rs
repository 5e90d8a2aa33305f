use crate::config::build_info;
use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::grammar::ParsingTable;
use crate::tokens::Vocabulary;

/// What the standard pipeline is configured with
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub keyword_count: usize,
    pub symbol_count: usize,
    pub production_count: usize,
    pub table_entries: usize,
    pub max_file_size: u64,
    pub supported_extensions: Vec<String>,
    pub build_profile: &'static str,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Paradigm Classification Pipeline:\n\
             - Pipeline Stages: {}\n\
             - Keywords: {}\n\
             - Symbols: {}\n\
             - Productions: {}\n\
             - Parsing Table Entries: {}\n\
             - Max File Size: {} MB\n\
             - Batch Extensions: {}\n\
             - Build Profile: {}",
            self.pipeline_stages,
            self.keyword_count,
            self.symbol_count,
            self.production_count,
            self.table_entries,
            self.max_file_size / (1024 * 1024),
            self.supported_extensions.join(", "),
            self.build_profile
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage classifier over {} productions ({} profile)",
            self.pipeline_stages, self.production_count, self.build_profile
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    let vocabulary = Vocabulary::standard();
    let table = ParsingTable::standard();

    PipelineInfo {
        // file, scan, parse, classify
        pipeline_stages: 4,
        keyword_count: vocabulary.keyword_count(),
        symbol_count: vocabulary.symbol_count(),
        production_count: table.productions().len(),
        table_entries: table.entry_count(),
        max_file_size: MAX_FILE_SIZE,
        supported_extensions: crate::batch::BatchConfig::default().extensions,
        build_profile: build_info::profile(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_info() {
        let info = get_pipeline_info();
        assert_eq!(info.keyword_count, 15);
        assert_eq!(info.symbol_count, 10);
        assert_eq!(info.production_count, 8);
        assert!(info.report().contains("Productions: 8"));
        assert!(info.summary().starts_with("4-stage"));
    }
}
