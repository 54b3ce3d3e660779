//! CPU execution of [`crate::StylePlan`]s onto a scoped premultiplied RGBA8 frame.

pub(crate) mod cpu;
pub(crate) mod effects;
pub(crate) mod frame;
