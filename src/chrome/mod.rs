//! Page chrome around the projects list: the persisted color theme, the
//! scroll-spy navigation highlight and the citation modal.

pub mod cite;
pub mod scrollspy;
pub mod theme;
