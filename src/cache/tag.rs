use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKind {
    Student,
    Teacher,
    Subject,
    Exam,
    School,
    Assessment,
    AllowList,
    Profile,
}

impl TagKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Teacher => "Teacher",
            Self::Subject => "Subject",
            Self::Exam => "Exam",
            Self::School => "School",
            Self::Assessment => "Assessment",
            Self::AllowList => "AllowList",
            Self::Profile => "Profile",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagId {
    Id(String),
    /// Sentinel provided by list queries.
    List,
}

/// Cache tag: an entity type, optionally narrowed to an id or the list
/// sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub kind: TagKind,
    pub id: Option<TagId>,
}

impl Tag {
    #[must_use]
    pub const fn kind(kind: TagKind) -> Self {
        Self { kind, id: None }
    }

    #[must_use]
    pub fn id(kind: TagKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(TagId::Id(id.into())),
        }
    }

    #[must_use]
    pub const fn list(kind: TagKind) -> Self {
        Self {
            kind,
            id: Some(TagId::List),
        }
    }

    /// Whether invalidating `self` invalidates an entry that provided `provided`.
    #[must_use]
    pub fn matches(&self, provided: &Tag) -> bool {
        self.kind == provided.kind && (self.id.is_none() || self.id == provided.id)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            None => f.write_str(self.kind.as_str()),
            Some(TagId::List) => write!(f, "{}:LIST", self.kind.as_str()),
            Some(TagId::Id(id)) => write!(f, "{}:{id}", self.kind.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Tag::kind(TagKind::Student).to_string(), "Student");
        assert_eq!(Tag::list(TagKind::Teacher).to_string(), "Teacher:LIST");
        assert_eq!(Tag::id(TagKind::Teacher, "t1").to_string(), "Teacher:t1");
    }

    #[test]
    fn matching_rules() {
        let any_student = Tag::kind(TagKind::Student);
        let student_list = Tag::list(TagKind::Student);
        let student_one = Tag::id(TagKind::Student, "1");

        assert!(any_student.matches(&student_list));
        assert!(any_student.matches(&student_one));
        assert!(student_list.matches(&student_list));
        assert!(!student_list.matches(&student_one));
        assert!(!student_one.matches(&any_student));
        assert!(!any_student.matches(&Tag::kind(TagKind::Teacher)));
    }
}
