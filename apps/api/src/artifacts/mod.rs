// Downstream artifact generation: cover letter content, HTML templating,
// PDF rendering, and object storage. All thin collaborators behind traits
// so the orchestrator (and its tests) never touch the wire directly.

pub mod cover_letter;
pub mod html;
pub mod render;
pub mod storage;
