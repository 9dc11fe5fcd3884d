//! Content resolution core: the per-site category tree, translation
//! fallback, slug-chain resolution, and path enumeration.

mod enumerate;
mod lang;
mod resolver;
mod tree;

pub use self::{
    enumerate::{enumerate_site, revalidation_paths, revalidation_paths_for, site_paths},
    lang::{localized, localized_opt},
    resolver::{
        Breadcrumb,
        CategoryLink,
        CategoryPage,
        HomePage,
        PostLink,
        PostPage,
        Resolution,
        home,
        resolve,
    },
    tree::CategoryTree,
};
