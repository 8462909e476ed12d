// Cross-cutting prompt fragments shared by the optimize and suggestions
// modules. Module-specific templates live next to their callers.

/// Content-preservation rule injected into every formatter prompt.
/// The formatter must NEVER drop source content — every skill, job entry,
/// project, and responsibility bullet in the input appears in the output.
pub const PRESERVE_CONTENT_INSTRUCTION: &str = "CRITICAL CONTENT RULE: Include EVERY item present in the input. \
    Every skill, every job entry, every project, every responsibility bullet, \
    every certification. Do NOT summarize lists. Do NOT drop entries. \
    Reformatting must be lossless.";

/// Factual-grounding rule injected into every optimizer prompt.
pub const FACTUAL_INSTRUCTION: &str = "FACTUAL RULE: Rephrase and restructure only. Do NOT invent employers, \
    titles, dates, degrees, or metrics that are not present in the source \
    resume. New keywords may only be introduced where the source shows \
    genuinely related experience.";
