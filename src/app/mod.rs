// Application layer: the concrete pipelines wired from ports and core logic.

pub mod pipelines;
