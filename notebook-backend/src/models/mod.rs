pub mod note;

pub use note::{
    CreateNoteRequest, ErrorResponse, Note, NoteSummary, PageRequest, Tag, UpdateNoteRequest,
};
