//! Rendering of the study hierarchy as a `termtree` tree

use termtree::Tree;
use tracing::instrument;

use crate::domain::{Candidate, Cro, Facility, Provider, Study};

pub trait ToTermTree {
    fn to_term_tree(&self) -> Tree<String>;
}

impl ToTermTree for Study {
    #[instrument(level = "debug", skip(self), fields(study = %self.id))]
    fn to_term_tree(&self) -> Tree<String> {
        Tree::new(format!("{} ({})", self.name, self.id))
            .with_leaves(self.cros.iter().map(|c| c.to_term_tree()))
    }
}

impl ToTermTree for Cro {
    fn to_term_tree(&self) -> Tree<String> {
        Tree::new(format!("CRO {} ({})", self.name, self.id))
            .with_leaves(self.facilities.iter().map(|f| f.to_term_tree()))
    }
}

impl ToTermTree for Facility {
    fn to_term_tree(&self) -> Tree<String> {
        Tree::new(format!("HCF {} ({}) [{}]", self.name, self.id, self.status))
            .with_leaves(self.providers.iter().map(|p| p.to_term_tree()))
    }
}

impl ToTermTree for Provider {
    fn to_term_tree(&self) -> Tree<String> {
        Tree::new(format!("PCP {} ({})", self.name, self.id))
            .with_leaves(self.candidates.iter().map(|c| c.to_term_tree()))
    }
}

impl ToTermTree for Candidate {
    fn to_term_tree(&self) -> Tree<String> {
        let name = self.name.as_deref().unwrap_or("Patient");
        match self.enrollment_status.as_deref() {
            Some(status) => Tree::new(format!("{} ({}) - {}", name, self.id, status)),
            None => Tree::new(format!("{} ({})", name, self.id)),
        }
    }
}
