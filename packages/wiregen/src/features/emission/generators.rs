//! Generator table emitter
//!
//! Lists every `generate_` function that carries an `@name` annotation,
//! keyed by its stem, in declaration order.

use super::builder::HEADER;
use super::writer::{js_string, CodeWriter};
use crate::features::extraction::SignatureSet;
use crate::shared::{FunctionKind, NamingConvention, Signature};

pub struct GeneratorTableEmitter<'a> {
    convention: NamingConvention<'a>,
}

impl<'a> GeneratorTableEmitter<'a> {
    pub fn new(convention: NamingConvention<'a>) -> Self {
        Self { convention }
    }

    /// Generators that make it into the table
    pub fn listed<'s>(&self, signatures: &'s SignatureSet) -> Vec<&'s Signature> {
        signatures
            .of_kind(FunctionKind::Generate)
            .filter(|s| s.annotations.get("name").is_some())
            .collect()
    }

    pub fn emit(&self, signatures: &SignatureSet) -> String {
        let mut w = CodeWriter::new();
        w.line(HEADER);
        w.blank();
        w.block(
            &format!("const {} = {{", self.convention.emit().generators_name),
            self.listed(signatures)
                .into_iter()
                .map(|s| format!("{}: {},", js_string(&s.stem), s.name)),
            "};",
            "",
        );
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::features::extraction::SignatureExtractor;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_named_generators() {
        let source = r#"
/** @name Fibonacci word */
function generate_fibonacci_word(n: number): string { return ""; }
function generate_unlisted(n: number): string { return ""; }
/**
 * @name Thue-Morse word
 * @description Prefix of the Thue-Morse sequence
 */
export function generate_thue_morse(n: number): string { return ""; }
/** @name Not a generator */
function construct_suffix_array(text: string) {}
"#;
        let config = GeneratorConfig::default();
        let conv = NamingConvention::new(&config.naming, &config.emit);
        let set = SignatureExtractor::new(conv, &[FunctionKind::Generate]).extract(source);
        let out = GeneratorTableEmitter::new(conv).emit(&set);

        assert_eq!(
            out,
            "// Generated by wiregen. Do not edit.\n\
             \n\
             const string_generators = {\n  \
             'fibonacci_word': generate_fibonacci_word,\n  \
             'thue_morse': generate_thue_morse,\n\
             };\n"
        );
    }

    #[test]
    fn test_empty_table() {
        let config = GeneratorConfig::default();
        let conv = NamingConvention::new(&config.naming, &config.emit);
        let out = GeneratorTableEmitter::new(conv).emit(&SignatureSet::new());
        assert!(out.ends_with("const string_generators = {};\n"));
    }
}
