//! Page template for the exported read-only viewer.

/// Replaced by the escaped document JSON.
pub const DATA_PLACEHOLDER: &str = "__FLOORPLAN_DATA__";
/// Statement the payload is assigned in; the payload runs to the end of the line.
pub const DATA_ASSIGNMENT: &str = "const MAP_DATA = ";

pub const VIEWER_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Store Map</title>
  <style>
    body { margin: 0; overflow: hidden; font-family: sans-serif; }
    #container { width: 100vw; height: 100vh; }
    #sidebar {
      position: absolute; top: 0; left: 0; width: 220px; height: 100%;
      background: rgba(255, 255, 255, 0.92); overflow-y: auto; padding: 10px;
      box-sizing: border-box; transition: transform 0.3s ease; z-index: 5;
    }
    #sidebar.hidden { transform: translateX(-220px); }
    #toggle-sidebar {
      position: absolute; top: 10px; left: 230px; z-index: 6; padding: 5px 10px;
      background: rgb(64, 153, 217); color: #fff; border: none; border-radius: 4px; cursor: pointer;
    }
    #shelf-list { list-style: none; padding: 0; margin: 0; }
    #shelf-list li {
      padding: 5px; margin: 5px 0; border: 1px solid #ddd; border-radius: 3px;
      cursor: pointer; transition: background 0.3s ease;
    }
    #shelf-list li.highlight { background: rgb(244, 122, 122); }
  </style>
  <script type="importmap">
    {
      "imports": {
        "three": "https://cdn.jsdelivr.net/npm/three@0.173.0/build/three.module.js",
        "three/addons/": "https://cdn.jsdelivr.net/npm/three@0.173.0/examples/jsm/"
      }
    }
  </script>
</head>
<body>
  <div id="sidebar">
    <h3>Shelves</h3>
    <ul id="shelf-list"></ul>
  </div>
  <button id="toggle-sidebar">Shelves</button>
  <div id="container"></div>
  <script type="module">
    import * as THREE from 'three';
    import { OrbitControls } from 'three/addons/controls/OrbitControls.js';

    const MAP_DATA = __FLOORPLAN_DATA__;
    const FLASH_COLOR = 0xf47a7a;
    const FLASH_MS = 1000;
    const FOCUS_HEIGHT = 50;

    const container = document.getElementById('container');
    const scene = new THREE.Scene();
    scene.background = new THREE.Color(0xf0f0f0);

    const camera = new THREE.PerspectiveCamera(60, window.innerWidth / window.innerHeight, 0.1, 1000);
    camera.position.set(30, 30, 30);

    const renderer = new THREE.WebGLRenderer({ antialias: true });
    renderer.setSize(window.innerWidth, window.innerHeight);
    renderer.shadowMap.enabled = true;
    container.appendChild(renderer.domElement);

    const controls = new OrbitControls(camera, renderer.domElement);
    controls.enableDamping = true;
    controls.dampingFactor = 0.25;
    controls.minDistance = 10;
    controls.maxDistance = 100;

    scene.add(new THREE.AmbientLight(0x505050));
    const sun = new THREE.DirectionalLight(0xf2f2f2, 0.8);
    sun.position.set(10, 30, 10);
    scene.add(sun);

    if (MAP_DATA.storeMap) {
      const floor = new THREE.Mesh(
        new THREE.PlaneGeometry(MAP_DATA.storeMap.width, MAP_DATA.storeMap.depth),
        new THREE.MeshStandardMaterial({ color: 0xdddddd, side: THREE.DoubleSide })
      );
      floor.rotation.x = -Math.PI / 2;
      floor.receiveShadow = true;
      scene.add(floor);
    }

    function makeLabel(text, width, height) {
      const canvas = document.createElement('canvas');
      canvas.width = 256;
      canvas.height = 64;
      const ctx = canvas.getContext('2d');
      ctx.font = '48px sans-serif';
      ctx.fillStyle = 'black';
      ctx.textAlign = 'center';
      ctx.textBaseline = 'middle';
      ctx.fillText(text, canvas.width / 2, canvas.height / 2);
      const texture = new THREE.CanvasTexture(canvas);
      const plane = new THREE.Mesh(
        new THREE.PlaneGeometry(width, 0.5),
        new THREE.MeshBasicMaterial({ map: texture, transparent: true })
      );
      plane.position.y = height / 2 + 0.01;
      plane.rotation.x = -Math.PI / 2;
      plane.raycast = () => {};
      return plane;
    }

    const meshes = new Map();
    for (const obj of MAP_DATA.objects || []) {
      const mesh = new THREE.Mesh(
        new THREE.BoxGeometry(obj.width, obj.height, obj.depth),
        new THREE.MeshBasicMaterial({ color: '#' + obj.color })
      );
      mesh.castShadow = true;
      mesh.receiveShadow = true;
      if (obj.type !== 'Tile') {
        const edges = new THREE.LineSegments(
          new THREE.EdgesGeometry(mesh.geometry),
          new THREE.LineBasicMaterial({ color: 0x000000 })
        );
        edges.raycast = () => {};
        mesh.add(edges);
      }
      const rotation = obj.rotation || { x: 0, y: 0, z: 0 };
      mesh.position.set(obj.position.x, obj.position.y, obj.position.z);
      mesh.rotation.set(rotation.x, rotation.y, rotation.z);
      mesh.add(makeLabel(obj.label || obj.type, obj.width, obj.height));
      mesh.userData.baseColor = mesh.material.color.getHex();
      scene.add(mesh);
      meshes.set(obj.id, mesh);
    }

    function focusOn(mesh) {
      controls.target.copy(mesh.position);
      camera.position.set(mesh.position.x, mesh.position.y + FOCUS_HEIGHT, mesh.position.z);
      controls.update();
    }

    function flashObject(mesh) {
      if (mesh.userData.flashTimer) {
        clearTimeout(mesh.userData.flashTimer);
      }
      mesh.material.color.setHex(FLASH_COLOR);
      mesh.userData.flashTimer = setTimeout(() => {
        mesh.material.color.setHex(mesh.userData.baseColor);
        mesh.userData.flashTimer = null;
      }, FLASH_MS);
    }

    function flashListItem(li) {
      if (li.flashTimer) {
        clearTimeout(li.flashTimer);
      }
      li.classList.add('highlight');
      li.scrollIntoView({ behavior: 'smooth', block: 'center' });
      li.flashTimer = setTimeout(() => {
        li.classList.remove('highlight');
        li.flashTimer = null;
      }, FLASH_MS);
    }

    const list = document.getElementById('shelf-list');
    for (const obj of MAP_DATA.objects || []) {
      if (obj.type !== 'Shelf') continue;
      const li = document.createElement('li');
      li.textContent = obj.label || obj.type;
      li.dataset.id = obj.id;
      li.addEventListener('click', () => {
        const mesh = meshes.get(obj.id);
        if (!mesh) return;
        focusOn(mesh);
        flashObject(mesh);
        flashListItem(li);
      });
      list.appendChild(li);
    }

    document.getElementById('toggle-sidebar').addEventListener('click', () => {
      document.getElementById('sidebar').classList.toggle('hidden');
    });

    window.addEventListener('resize', () => {
      camera.aspect = window.innerWidth / window.innerHeight;
      camera.updateProjectionMatrix();
      renderer.setSize(window.innerWidth, window.innerHeight);
    });

    function animate() {
      requestAnimationFrame(animate);
      controls.update();
      renderer.render(scene, camera);
    }
    animate();
  </script>
</body>
</html>
"##;
