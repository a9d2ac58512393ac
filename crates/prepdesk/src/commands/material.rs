//! Material CRUD operations and visibility management

use super::*;

impl<S: MaterialStore> CommandExecutor<S> {
    /// Add a new material to the shelf.
    ///
    /// New materials are visible by default; every field is required and
    /// the subject must come from the catalog. Returns the new id.
    pub fn add_material(
        &self,
        title: String,
        subject: String,
        content_type: ContentType,
        url: String,
        created_by: String,
    ) -> Result<String> {
        if title.trim().is_empty() {
            return Err(anyhow!("Material title must not be empty"));
        }
        if url.trim().is_empty() {
            return Err(anyhow!("Material URL must not be empty"));
        }
        if !crate::subjects::is_valid(&subject) {
            return Err(crate::errors::unknown_subject(&subject).into());
        }

        let material = Material::new(title, subject, content_type, url, created_by);
        self.storage.save_material(&material)?;

        // Log event
        let event = Event::new_material_added(&material);
        self.storage.append_event(&event)?;

        Ok(material.id)
    }

    /// List materials matching a query, newest first.
    pub fn list_materials(&self, query: &MaterialQuery) -> Result<Vec<Material>> {
        let mut materials: Vec<Material> = self
            .storage
            .list_materials()?
            .into_iter()
            .filter(|m| query.matches(m))
            .collect();

        materials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(materials)
    }

    /// Load one material by id or unique prefix.
    pub fn show_material(&self, id: &str) -> Result<Material> {
        let full_id = self.storage.resolve_material_id(id)?;
        self.storage.load_material(&full_id)
    }

    /// Toggle whether a material appears on public surfaces.
    pub fn set_visibility(&self, id: &str, visible: bool) -> Result<Material> {
        let full_id = self.storage.resolve_material_id(id)?;
        let mut material = self.storage.load_material(&full_id)?;

        if material.visible != visible {
            material.visible = visible;
            self.storage.save_material(&material)?;

            let event = Event::new_visibility_changed(material.id.clone(), visible);
            self.storage.append_event(&event)?;
        }

        Ok(material)
    }

    /// Update material metadata fields.
    ///
    /// Only the provided fields change; the content reference stays opaque
    /// (a new URL replaces the old string wholesale).
    pub fn update_material(
        &self,
        id: &str,
        title: Option<String>,
        subject: Option<String>,
        url: Option<String>,
    ) -> Result<Material> {
        let full_id = self.storage.resolve_material_id(id)?;
        let mut material = self.storage.load_material(&full_id)?;
        let mut changed = false;

        if let Some(t) = title {
            if t.trim().is_empty() {
                return Err(anyhow!("Material title must not be empty"));
            }
            material.title = t;
            changed = true;
        }
        if let Some(s) = subject {
            if !crate::subjects::is_valid(&s) {
                return Err(crate::errors::unknown_subject(&s).into());
            }
            material.subject = s;
            changed = true;
        }
        if let Some(u) = url {
            if u.trim().is_empty() {
                return Err(anyhow!("Material URL must not be empty"));
            }
            material.url = u;
            changed = true;
        }

        if changed {
            self.storage.save_material(&material)?;

            let event = Event::new_material_updated(material.id.clone());
            self.storage.append_event(&event)?;
        }

        Ok(material)
    }

    /// Remove a material from the shelf.
    pub fn delete_material(&self, id: &str) -> Result<String> {
        let full_id = self.storage.resolve_material_id(id)?;
        self.storage.delete_material(&full_id)?;

        let event = Event::new_material_deleted(full_id.clone());
        self.storage.append_event(&event)?;

        Ok(full_id)
    }
}
