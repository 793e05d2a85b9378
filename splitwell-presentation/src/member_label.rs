use splitwell_domain::Member;
use std::borrow::Cow;

/// Display name, falling back to the id for unnamed members.
pub(crate) fn member_label(member: &Member) -> Cow<'_, str> {
    if member.name.trim().is_empty() {
        Cow::Owned(member.id.to_string())
    } else {
        Cow::Borrowed(member.name.as_str())
    }
}
