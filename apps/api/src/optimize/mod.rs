// The optimization pipeline core.
//
// Two fan-out waves per run: Wave 1 rewrites section text concurrently
// (fail-fast), Wave 2 formats each section into its canonical JSON shape
// concurrently (isolate-on-failure), then a total merge produces the
// ResumeDocument. The orchestrator selects which variant runs and drives
// the artifact tail. All LLM calls go through llm_client — no direct
// vendor calls here.

pub mod assembler;
pub mod formatter;
pub mod handlers;
pub mod optimizer;
pub mod orchestrator;
pub mod prompts;
pub mod schemas;
pub mod sections;

#[cfg(test)]
pub(crate) mod test_stubs;
