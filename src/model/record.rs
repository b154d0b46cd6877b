use super::types::{Category, Idea, Project, Scores};

/// Read-only view of a project or idea used by the filter and sort stages.
///
/// Accessors return `None` where a record type has no such field, so the
/// view pipeline can run over either collection without a type guard.
pub trait Record {
    fn id(&self) -> u64;

    /// Display name: a project's name or an idea's title.
    fn display_name(&self) -> &str;

    /// Owning person searched alongside the name. Only projects have one.
    fn owner_name(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Category;

    /// Label of the lifecycle status, compared by status filters.
    fn status_label(&self) -> &'static str;

    fn portfolio_id(&self) -> Option<u64>;

    fn benefit_projection(&self) -> Option<f64> {
        None
    }

    fn progress(&self) -> Option<u8> {
        None
    }

    fn finance_label(&self) -> Option<&'static str> {
        None
    }

    fn votes(&self) -> Option<u32> {
        None
    }

    fn scores(&self) -> Option<&Scores> {
        None
    }
}

impl Record for Project {
    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn owner_name(&self) -> Option<&str> {
        Some(&self.pm)
    }

    fn category(&self) -> Category {
        self.category
    }

    fn status_label(&self) -> &'static str {
        self.project_status.label()
    }

    fn portfolio_id(&self) -> Option<u64> {
        self.portfolio_id
    }

    fn benefit_projection(&self) -> Option<f64> {
        Some(self.benefit_projection)
    }

    fn progress(&self) -> Option<u8> {
        Some(self.progress)
    }

    fn finance_label(&self) -> Option<&'static str> {
        Some(self.finance_approval.label())
    }
}

impl Record for Idea {
    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Category {
        self.category
    }

    fn status_label(&self) -> &'static str {
        self.status.label()
    }

    fn portfolio_id(&self) -> Option<u64> {
        self.portfolio_id
    }

    fn votes(&self) -> Option<u32> {
        Some(self.votes)
    }

    fn scores(&self) -> Option<&Scores> {
        self.scores.as_ref()
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn id(&self) -> u64 {
        (**self).id()
    }

    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    fn owner_name(&self) -> Option<&str> {
        (**self).owner_name()
    }

    fn category(&self) -> Category {
        (**self).category()
    }

    fn status_label(&self) -> &'static str {
        (**self).status_label()
    }

    fn portfolio_id(&self) -> Option<u64> {
        (**self).portfolio_id()
    }

    fn benefit_projection(&self) -> Option<f64> {
        (**self).benefit_projection()
    }

    fn progress(&self) -> Option<u8> {
        (**self).progress()
    }

    fn finance_label(&self) -> Option<&'static str> {
        (**self).finance_label()
    }

    fn votes(&self) -> Option<u32> {
        (**self).votes()
    }

    fn scores(&self) -> Option<&Scores> {
        (**self).scores()
    }
}
