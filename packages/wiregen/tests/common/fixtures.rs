//! Test fixture generators
//!
//! Source snippets in the shape the generator consumes: annotated
//! `construct_`/`count_`/`generate_` function declarations.

use wiregen::{GenerationOutput, GenerationPipeline, GeneratorConfig};

/// A construct function with untyped parameters
pub fn fixture_construct(stem: &str, params: &[&str]) -> String {
    format!(
        "function construct_{stem}({}): number[] {{ return []; }}\n",
        params.join(", ")
    )
}

/// `construct_s0(text)`, `construct_s1(s0)`, ... `construct_s{n-1}(s{n-2})`
pub fn fixture_chain(n: usize) -> String {
    (0..n)
        .map(|i| {
            if i == 0 {
                fixture_construct("s0", &["text"])
            } else {
                fixture_construct(&format!("s{i}"), &[format!("s{}", i - 1).as_str()])
            }
        })
        .collect()
}

/// Declares `construct_s{i}` for every `i` in `declaration_order`, each taking
/// its providers from `edges` (`(dependent, dependency)` pairs).
pub fn fixture_graph(declaration_order: &[usize], edges: &[(usize, usize)]) -> String {
    declaration_order
        .iter()
        .map(|&i| {
            let mut params: Vec<String> = vec!["text".to_string()];
            for &(from, to) in edges {
                if from == i {
                    params.push(format!("s{to}"));
                }
            }
            let refs: Vec<&str> = params.iter().map(String::as_str).collect();
            fixture_construct(&format!("s{i}"), &refs)
        })
        .collect()
}

/// A small but realistic string-algorithms module
pub fn fixture_string_algorithms() -> String {
    r#"
/**
 * @name SA
 * @kind enable
 * @description Suffix array
 */
export function construct_suffix_array(text: string): number[] { return []; }

/**
 * @name ISA
 * @kind enable
 */
export function construct_inverse_suffix_array(suffix_array: number[], n: number): number[] { return []; }

/**
 * @name LCP
 * @kind enable
 */
export function construct_lcp_array(text: string, suffix_array: number[], inverse_suffix_array: number[]): number[] { return []; }

/**
 * @name BWT
 * @kind enable
 */
export function construct_bw_transform(text: string, suffix_array: number[]): string { return ""; }

/**
 * @name Lyndon
 * @kind enable
 */
export function construct_lyndon_factorization(text: string): number[] { return []; }

function lcp_query(lcp_array: number[], i: number, j: number): number { return 0; }

/**
 * @name irreducible LCP
 * @structures lcp_array
 */
function count_lcp_array(lcp_array: number[]): number { return 0; }

/**
 * @kind hidden
 * @structures text
 */
function count_sigma(text: string): number { return 0; }
"#
    .to_string()
}

pub fn default_pipeline() -> GenerationPipeline {
    GenerationPipeline::new(GeneratorConfig::default()).expect("default config is valid")
}

/// Run the default pipeline, panicking on error
pub fn generate(source: &str) -> GenerationOutput {
    default_pipeline()
        .run(source)
        .unwrap_or_else(|e| panic!("generation failed: {e}"))
}
