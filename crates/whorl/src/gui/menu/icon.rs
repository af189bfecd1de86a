use super::ICON_SIZE;
use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use whorl_core::catalog::{Catalog, IconName};

/// Rasterized item icons, resolved once per catalog.
pub struct IconCache {
    icons: HashMap<IconName, Pixbuf>,
}

impl IconCache {
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let mut icons = HashMap::new();
        for item in catalog.iter() {
            match load_icon(&item.icon) {
                Some(pixbuf) => {
                    icons.insert(item.icon.clone(), pixbuf);
                }
                None => log::debug!("no icon found for '{}'", item.icon),
            }
        }
        Self { icons }
    }

    pub fn get(&self, icon: &IconName) -> Option<&Pixbuf> {
        self.icons.get(icon)
    }
}

fn load_icon(icon: &IconName) -> Option<Pixbuf> {
    let path = find_icon_path(icon)?;
    Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true).ok()
}

fn find_icon_path(icon: &IconName) -> Option<PathBuf> {
    if icon.is_empty() {
        return None;
    }

    let path = Path::new(icon.as_ref());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    lookup(icon.as_ref())
        .with_size(ICON_SIZE as u16)
        .with_scale(1)
        .find()
}
