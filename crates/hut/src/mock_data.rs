use serde::Serialize;

/// A member of the demo team directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: u32,
    pub name: &'static str,
    pub role: &'static str,
}

/// Fixed directory served by the demo site.
pub const MEMBERS: &[Member] = &[
    Member {
        id: 1,
        name: "Ada Lovelace",
        role: "Analyst",
    },
    Member {
        id: 2,
        name: "Grace Hopper",
        role: "Compiler Engineer",
    },
    Member {
        id: 3,
        name: "Edsger Dijkstra",
        role: "Algorithms",
    },
];

pub fn find_member(id: u32) -> Option<&'static Member> {
    MEMBERS.iter().find(|member| member.id == id)
}
