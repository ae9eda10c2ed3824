//! Content entity kinds and their reference-expansion rules.
//!
//! Each kind declares which fields hold file ids or other-entity ids, how
//! they are shaped, where the resolved value goes and what happens to ids
//! that no longer resolve. The resolver interprets these tables; nothing
//! else in the crate hard-codes per-entity expansion.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Industry,
    Client,
    Certificate,
    News,
    About,
    Quote,
}

impl EntityKind {
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Industry => "industries",
            Self::Client => "clients",
            Self::Certificate => "certificates",
            Self::News => "news",
            Self::About => "about",
            Self::Quote => "quotes",
        }
    }

    /// Route prefix.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Product => "/products",
            Self::Industry => "/industries",
            Self::Client => "/clients",
            Self::Certificate => "/certificates",
            Self::News => "/news",
            Self::About => "/about",
            Self::Quote => "/contact-us",
        }
    }

    /// Response key for a single document.
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Industry => "industry",
            Self::Client => "client",
            Self::Certificate => "certificate",
            Self::News => "news",
            Self::About => "about",
            Self::Quote => "quote",
        }
    }

    /// Response key for a list of documents.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Industry => "industries",
            Self::Client => "clients",
            Self::Certificate => "certificates",
            Self::News => "news",
            Self::About => "about_pages",
            Self::Quote => "quotes",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Industry => "Industry",
            Self::Client => "Client",
            Self::Certificate => "Certificate",
            Self::News => "News",
            Self::About => "About page",
            Self::Quote => "Quote request",
        }
    }

    /// Field naming the document in notifications.
    pub const fn label_field(self) -> &'static str {
        match self {
            Self::Product => "name",
            Self::Industry => "industry_name",
            Self::Client => "client_name",
            Self::Certificate => "certificate_name",
            Self::News | Self::About => "title",
            Self::Quote => "email",
        }
    }

    pub fn expansions(self) -> &'static [Expansion] {
        match self {
            Self::Product => PRODUCT,
            Self::Industry => INDUSTRY,
            Self::Client => CLIENT,
            Self::Certificate => CERTIFICATE,
            Self::News => NEWS,
            Self::About => ABOUT,
            Self::Quote => &[],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// One reference-bearing field of an entity.
#[derive(Debug, Clone, Copy)]
pub struct Expansion {
    pub field: &'static str,
    pub shape: Shape,
    pub reference: Reference,
    pub target: Target,
    pub on_missing: Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A single id.
    One,
    /// A list of ids. A `{keep, new_uploaded_ids}` directive is also accepted.
    Many,
    /// A list of objects, each holding one id under `item_field`. The
    /// resolved value is written onto each object.
    Nested { item_field: &'static str },
    /// A list of objects (or bare ids); every item's `item_field` is
    /// resolved and the results gathered into one list.
    Collect { item_field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    File(FileClass),
    Entity(EntityKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Plain,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Overwrite the source field (or, for nested shapes, the item field).
    InPlace,
    /// Write under a new key and keep the ids as they were.
    Attach(&'static str),
}

/// What happens to an id that does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Null,
    Drop,
}

const fn file(field: &'static str, shape: Shape, target: Target, on_missing: Missing) -> Expansion {
    Expansion {
        field,
        shape,
        reference: Reference::File(FileClass::Plain),
        target,
        on_missing,
    }
}

const fn video(field: &'static str, target: Target) -> Expansion {
    Expansion {
        field,
        shape: Shape::One,
        reference: Reference::File(FileClass::Video),
        target,
        on_missing: Missing::Null,
    }
}

const fn linked(field: &'static str, kind: EntityKind, attach_as: &'static str) -> Expansion {
    Expansion {
        field,
        shape: Shape::Many,
        reference: Reference::Entity(kind),
        target: Target::Attach(attach_as),
        on_missing: Missing::Drop,
    }
}

static PRODUCT: &[Expansion] = &[
    file("cover_image", Shape::One, Target::InPlace, Missing::Null),
    file("product_360_image", Shape::One, Target::InPlace, Missing::Null),
    video("product_3d_video", Target::InPlace),
    file("images", Shape::Many, Target::InPlace, Missing::Null),
    file("documents", Shape::Many, Target::InPlace, Missing::Null),
    file(
        "features",
        Shape::Nested {
            item_field: "image_id",
        },
        Target::Attach("image"),
        Missing::Null,
    ),
];

static INDUSTRY: &[Expansion] = &[
    file("industry_logo", Shape::One, Target::InPlace, Missing::Null),
    file("cover_image", Shape::One, Target::InPlace, Missing::Null),
    file("industry_images", Shape::Many, Target::InPlace, Missing::Drop),
    linked("client_ids", EntityKind::Client, "clients"),
    linked("product_ids", EntityKind::Product, "products"),
    linked("certification_ids", EntityKind::Certificate, "certifications"),
];

static CLIENT: &[Expansion] = &[file(
    "client_logo",
    Shape::One,
    Target::InPlace,
    Missing::Null,
)];

static CERTIFICATE: &[Expansion] = &[file(
    "certificate_logo",
    Shape::One,
    Target::InPlace,
    Missing::Null,
)];

static NEWS: &[Expansion] = &[
    file("news_logo", Shape::One, Target::InPlace, Missing::Null),
    file("cover_image", Shape::One, Target::InPlace, Missing::Null),
    file("news_images", Shape::Many, Target::InPlace, Missing::Drop),
];

static ABOUT: &[Expansion] = &[
    video("about_video", Target::Attach("about_video_file")),
    file(
        "product_images",
        Shape::Many,
        Target::Attach("product_images_files"),
        Missing::Drop,
    ),
    file(
        "industries_served",
        Shape::Nested {
            item_field: "image_id",
        },
        Target::Attach("image_file"),
        Missing::Null,
    ),
    file(
        "gallery",
        Shape::Collect {
            item_field: "file_id",
        },
        Target::Attach("gallery_files"),
        Missing::Drop,
    ),
];
